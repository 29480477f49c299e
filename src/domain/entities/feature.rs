//! Feature entity: a named amenity tag shared across properties.

use serde::Deserialize;

/// An amenity tag such as "Sea View". Unique by name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Feature {
    pub id: i64,
    pub name: String,
}

impl Feature {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Feature names as clients send them: a JSON list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FeatureNames {
    List(Vec<String>),
    Csv(String),
}

impl FeatureNames {
    /// Normalizes to trimmed, non-empty names with duplicates removed.
    ///
    /// First occurrence wins, so the input order is preserved.
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            FeatureNames::List(names) => names,
            FeatureNames::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        normalize_names(raw)
    }
}

/// Trims, drops empties and deduplicates a list of feature names.
pub fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || out.iter().any(|n| n == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_and_list_normalize_identically() {
        let csv = FeatureNames::Csv("Gym, Pool".to_string()).normalize();
        let list = FeatureNames::List(vec!["Gym".to_string(), "Pool".to_string()]).normalize();
        assert_eq!(csv, list);
        assert_eq!(csv, vec!["Gym", "Pool"]);
    }

    #[test]
    fn test_normalize_drops_blanks_and_duplicates() {
        let names = FeatureNames::Csv(" Gym ,, Pool, Gym ,  ".to_string()).normalize();
        assert_eq!(names, vec!["Gym", "Pool"]);

        let names =
            FeatureNames::List(vec![" ".into(), "Parking".into(), "Parking ".into()]).normalize();
        assert_eq!(names, vec!["Parking"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(FeatureNames::Csv(String::new()).normalize().is_empty());
        assert!(FeatureNames::List(vec![]).normalize().is_empty());
    }

    #[test]
    fn test_deserialize_both_forms() {
        let list: FeatureNames = serde_json::from_str(r#"["Gym","Pool"]"#).unwrap();
        assert_eq!(list, FeatureNames::List(vec!["Gym".into(), "Pool".into()]));

        let csv: FeatureNames = serde_json::from_str(r#""Gym, Pool""#).unwrap();
        assert_eq!(csv, FeatureNames::Csv("Gym, Pool".into()));
    }
}
