//! Versioned anomaly class taxonomy loaded from TOML

use crate::error::ClassifierError;
use saliency_domain::{AnomalyClass, ClassDescription, PLACEHOLDER_SEVERITY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_TAXONOMY: &str = include_str!("../data/taxonomy.toml");

#[derive(Debug, Serialize, Deserialize)]
struct TaxonomyFile {
    version: u32,
    #[serde(default)]
    classes: Vec<ClassRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClassRecord {
    name: String,
    description: String,
    #[serde(default = "placeholder_severity")]
    severity: String,
}

fn placeholder_severity() -> String {
    PLACEHOLDER_SEVERITY.to_string()
}

/// An ordered, validated set of anomaly classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    version: u32,
    classes: Vec<AnomalyClass>,
}

impl Taxonomy {
    /// Create a taxonomy from classes, validating it
    pub fn new(version: u32, classes: Vec<AnomalyClass>) -> Result<Self, ClassifierError> {
        let taxonomy = Self { version, classes };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// The twelve-class taxonomy shipped with the crate
    pub fn builtin() -> Result<Self, ClassifierError> {
        Self::from_toml(BUILTIN_TAXONOMY)
    }

    /// Parse a taxonomy from TOML text
    pub fn from_toml(toml_str: &str) -> Result<Self, ClassifierError> {
        let file: TaxonomyFile = toml::from_str(toml_str)
            .map_err(|e| ClassifierError::Taxonomy(format!("Failed to parse TOML: {}", e)))?;

        let classes = file
            .classes
            .into_iter()
            .map(|record| {
                AnomalyClass::new(record.name, record.description).with_severity(record.severity)
            })
            .collect();

        Self::new(file.version, classes)
    }

    /// Load a taxonomy file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::Taxonomy(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String, ClassifierError> {
        let file = TaxonomyFile {
            version: self.version,
            classes: self
                .classes
                .iter()
                .map(|class| ClassRecord {
                    name: class.name.clone(),
                    description: class.description.clone(),
                    severity: class.severity.clone(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| ClassifierError::Taxonomy(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Check that the taxonomy is non-empty with unique, non-empty names
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::Taxonomy("taxonomy has no classes".to_string()));
        }

        let mut seen = HashSet::new();
        for class in &self.classes {
            if class.name.trim().is_empty() {
                return Err(ClassifierError::Taxonomy(
                    "class name must not be empty".to_string(),
                ));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(ClassifierError::Taxonomy(format!(
                    "duplicate class name '{}'",
                    class.name
                )));
            }
        }
        Ok(())
    }

    /// Format version of the taxonomy file
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Classes in file order
    pub fn classes(&self) -> &[AnomalyClass] {
        &self.classes
    }

    /// The (name, description) table
    pub fn descriptions(&self) -> Vec<ClassDescription> {
        self.classes.iter().map(AnomalyClass::summary).collect()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the taxonomy has no classes (never true for a validated one)
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomy() {
        let taxonomy = Taxonomy::builtin().unwrap();
        assert_eq!(taxonomy.version(), 1);
        assert_eq!(taxonomy.len(), 12);
        assert_eq!(taxonomy.classes()[0].name, "class_1");
        assert_eq!(taxonomy.classes()[11].name, "class_12");
        assert!(taxonomy.classes()[6].description.contains("bath tub"));
        assert!(taxonomy.classes().iter().all(|c| c.severity == "X"));
    }

    #[test]
    fn test_severity_defaults_to_placeholder() {
        let taxonomy = Taxonomy::from_toml(
            r#"
            version = 2

            [[classes]]
            name = "class_a"
            description = "flat"
            "#,
        )
        .unwrap();

        assert_eq!(taxonomy.version(), 2);
        assert_eq!(taxonomy.classes()[0].severity, PLACEHOLDER_SEVERITY);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Taxonomy::from_toml(
            r#"
            version = 1

            [[classes]]
            name = "class_1"
            description = "a"

            [[classes]]
            name = "class_1"
            description = "b"
            "#,
        );
        assert!(matches!(result, Err(ClassifierError::Taxonomy(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_empty_taxonomy_rejected() {
        assert!(Taxonomy::from_toml("version = 1").is_err());
        assert!(Taxonomy::new(1, Vec::new()).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Taxonomy::new(1, vec![AnomalyClass::new(" ", "nameless")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let parsed = Taxonomy::from_toml(&taxonomy.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, taxonomy);
    }

    #[test]
    fn test_missing_file() {
        let result = Taxonomy::load("/nonexistent/taxonomy.toml");
        assert!(matches!(result, Err(ClassifierError::Taxonomy(_))));
    }
}
