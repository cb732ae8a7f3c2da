//! Anomaly class module - the unit of the labeling taxonomy

use std::fmt;

/// Severity written for every class until the field gets a defined meaning.
pub const PLACEHOLDER_SEVERITY: &str = "X";

/// Prefix of every stored fault record identifier.
const RECORD_PREFIX: &str = "sensor_fault_";

/// Unique identifier of a stored anomaly class record, based on UUIDv4
///
/// Rendered as `sensor_fault_<uuid>` and used as the local name of the
/// record's subject IRI in the fact store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new random RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use saliency_domain::RecordId;
    ///
    /// let a = RecordId::new();
    /// let b = RecordId::new();
    /// assert_ne!(a, b);
    /// assert!(a.to_string().starts_with("sensor_fault_"));
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its `sensor_fault_<uuid>` form
    ///
    /// A bare UUID string is accepted too.
    pub fn from_string(s: &str) -> Result<Self, String> {
        let raw = s.strip_prefix(RECORD_PREFIX).unwrap_or(s);
        uuid::Uuid::parse_str(raw)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RECORD_PREFIX, uuid::Uuid::from_u128(self.0))
    }
}

/// A named anomaly class with its free-text shape description
///
/// Created in bulk from a taxonomy table and never updated by this system;
/// the fact store owns the persisted copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyClass {
    /// Unique class name, e.g. `class_7`
    pub name: String,

    /// Shape narrative used in prompts
    pub description: String,

    /// Reserved field, currently always [`PLACEHOLDER_SEVERITY`]
    pub severity: String,
}

impl AnomalyClass {
    /// Create a class with the placeholder severity
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            severity: PLACEHOLDER_SEVERITY.to_string(),
        }
    }

    /// Set an explicit severity
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    /// Project onto the (name, description) pair shown to the LLM
    pub fn summary(&self) -> ClassDescription {
        ClassDescription {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Name and description of a stored class, as returned by a list-all read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescription {
    /// Class name
    pub name: String,
    /// Shape narrative
    pub description: String,
}
