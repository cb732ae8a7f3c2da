//! SPARQL text rendering
//!
//! Every value that ends up inside query or update text passes through this
//! module: IRIs and variable names are validated, literals are escaped per
//! the SPARQL string grammar. Everything else in a literal is copied verbatim.

use crate::StoreError;
use saliency_domain::{Fact, PatternTerm, SelectQuery, Term, TriplePattern, RDF_TYPE};

/// Default ontology namespace for sensor fault classes
pub const DEFAULT_ONTOLOGY_PREFIX: &str = "http://www.semanticweb.org/sensor_fault_ontology#";

/// Class of every stored anomaly record
pub const SENSOR_FAULT: &str = "SensorFault";
/// Class name property
pub const NAME: &str = "name";
/// Severity property
pub const SEVERITY: &str = "severity";
/// Shape description property
pub const FAULT_DESC: &str = "fault_desc";

/// Variable bound to the record subject
pub const VAR_FAULT: &str = "sensor_fault";
/// Variable bound to the class name
pub const VAR_NAME: &str = "name";
/// Variable bound to the description
pub const VAR_DESC: &str = "fault_desc";
/// Variable bound to the severity
pub const VAR_SEVERITY: &str = "severity";

/// Ontology namespace used to complete local names into IRIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ontology {
    prefix: String,
}

impl Ontology {
    /// Create an ontology namespace, e.g. `http://example.org/onto#`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Complete a local name (`SensorFault`, `fault_desc`, ...) into an IRI
    pub fn iri(&self, local: &str) -> Result<String, StoreError> {
        validate_local_name(local)?;
        Ok(format!("{}{}", self.prefix, local))
    }
}

impl Default for Ontology {
    fn default() -> Self {
        Self::new(DEFAULT_ONTOLOGY_PREFIX)
    }
}

/// Escape a string for use inside a double-quoted SPARQL literal
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render a SELECT query as SPARQL text
///
/// ```
/// use saliency_store::sparql::{find_by_name_query, render_select};
/// use saliency_store::Ontology;
///
/// let query = find_by_name_query(&Ontology::default(), "class_3").unwrap();
/// let text = render_select(&query).unwrap();
/// assert!(text.contains(r#"FILTER(?name = "class_3")"#));
/// ```
pub fn render_select(query: &SelectQuery) -> Result<String, StoreError> {
    if query.variables.is_empty() {
        return Err(StoreError::InvalidIdentifier(
            "SELECT needs at least one variable".to_string(),
        ));
    }

    let mut projection = Vec::with_capacity(query.variables.len());
    for variable in &query.variables {
        projection.push(render_variable(variable)?);
    }

    let mut text = format!("SELECT {} WHERE {{\n", projection.join(" "));
    for pattern in &query.patterns {
        text.push_str(&format!("    {} .\n", render_pattern(pattern)?));
    }
    for filter in &query.filters {
        text.push_str(&format!(
            "    FILTER({} = \"{}\")\n",
            render_variable(&filter.variable)?,
            escape_literal(&filter.value)
        ));
    }
    text.push('}');
    Ok(text)
}

/// Render statements as a single `INSERT DATA` update
pub fn render_insert_data(facts: &[Fact]) -> Result<String, StoreError> {
    let mut text = String::from("INSERT DATA {\n");
    for fact in facts {
        text.push_str(&format!(
            "    {} {} {} .\n",
            render_term(&fact.subject)?,
            render_predicate(&fact.predicate)?,
            render_term(&fact.object)?
        ));
    }
    text.push('}');
    Ok(text)
}

/// SELECT over all stored classes: name and description
pub fn list_all_query(ontology: &Ontology) -> Result<SelectQuery, StoreError> {
    Ok(SelectQuery::select([VAR_NAME, VAR_DESC])
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(RDF_TYPE),
            PatternTerm::iri(ontology.iri(SENSOR_FAULT)?),
        )
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(ontology.iri(FAULT_DESC)?),
            PatternTerm::var(VAR_DESC),
        )
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(ontology.iri(NAME)?),
            PatternTerm::var(VAR_NAME),
        ))
}

/// SELECT of the classes whose name equals `name` exactly
pub fn find_by_name_query(ontology: &Ontology, name: &str) -> Result<SelectQuery, StoreError> {
    let mut query = list_all_query(ontology)?
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(ontology.iri(SEVERITY)?),
            PatternTerm::var(VAR_SEVERITY),
        )
        .filter_eq(VAR_NAME, name);
    query.variables.push(VAR_SEVERITY.to_string());
    Ok(query)
}

/// SELECT of the descriptions only
pub fn descriptions_query(ontology: &Ontology) -> Result<SelectQuery, StoreError> {
    Ok(SelectQuery::select([VAR_DESC])
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(RDF_TYPE),
            PatternTerm::iri(ontology.iri(SENSOR_FAULT)?),
        )
        .pattern(
            PatternTerm::var(VAR_FAULT),
            PatternTerm::iri(ontology.iri(FAULT_DESC)?),
            PatternTerm::var(VAR_DESC),
        ))
}

fn render_pattern(pattern: &TriplePattern) -> Result<String, StoreError> {
    let predicate = match &pattern.predicate {
        PatternTerm::Term(term) => render_predicate(term)?,
        other => render_pattern_term(other)?,
    };
    Ok(format!(
        "{} {} {}",
        render_pattern_term(&pattern.subject)?,
        predicate,
        render_pattern_term(&pattern.object)?
    ))
}

fn render_pattern_term(term: &PatternTerm) -> Result<String, StoreError> {
    match term {
        PatternTerm::Var(name) => render_variable(name),
        PatternTerm::Term(term) => render_term(term),
    }
}

fn render_predicate(term: &Term) -> Result<String, StoreError> {
    match term {
        Term::Iri(iri) if iri == RDF_TYPE => Ok("a".to_string()),
        Term::Iri(_) => render_term(term),
        Term::Literal(value) => Err(StoreError::InvalidIdentifier(format!(
            "literal '{}' in predicate position",
            value
        ))),
    }
}

fn render_term(term: &Term) -> Result<String, StoreError> {
    match term {
        Term::Iri(iri) => {
            validate_iri(iri)?;
            Ok(format!("<{}>", iri))
        }
        Term::Literal(value) => Ok(format!("\"{}\"", escape_literal(value))),
    }
}

fn render_variable(name: &str) -> Result<String, StoreError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StoreError::InvalidIdentifier(format!(
            "variable name '{}'",
            name
        )));
    }
    Ok(format!("?{}", name))
}

fn validate_local_name(local: &str) -> Result<(), StoreError> {
    let mut chars = local.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(format!(
            "local name '{}'",
            local
        )))
    }
}

// IRIREF excludes these plus control characters and space.
fn validate_iri(iri: &str) -> Result<(), StoreError> {
    let invalid = iri.is_empty()
        || iri
            .chars()
            .any(|c| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'));
    if invalid {
        return Err(StoreError::InvalidIdentifier(format!("IRI '{}'", iri)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "http://www.semanticweb.org/sensor_fault_ontology#";

    #[test]
    fn test_ontology_completes_local_names() {
        let ontology = Ontology::default();
        assert_eq!(
            ontology.iri("SensorFault").unwrap(),
            format!("{}SensorFault", PREFIX)
        );
    }

    #[test]
    fn test_ontology_rejects_bad_local_names() {
        let ontology = Ontology::default();
        assert!(ontology.iri("").is_err());
        assert!(ontology.iri("9lives").is_err());
        assert!(ontology.iri("a b").is_err());
        assert!(ontology.iri("x>").is_err());
    }

    #[test]
    fn test_list_all_query_text() {
        let query = list_all_query(&Ontology::default()).unwrap();
        let text = render_select(&query).unwrap();

        let expected = format!(
            "SELECT ?name ?fault_desc WHERE {{\n    \
             ?sensor_fault a <{p}SensorFault> .\n    \
             ?sensor_fault <{p}fault_desc> ?fault_desc .\n    \
             ?sensor_fault <{p}name> ?name .\n}}",
            p = PREFIX
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_find_by_name_query_text() {
        let query = find_by_name_query(&Ontology::default(), "class_9").unwrap();
        let text = render_select(&query).unwrap();

        assert!(text.starts_with("SELECT ?name ?fault_desc ?severity WHERE {"));
        assert!(text.contains(&format!("?sensor_fault <{}severity> ?severity .", PREFIX)));
        assert!(text.ends_with("    FILTER(?name = \"class_9\")\n}"));
    }

    #[test]
    fn test_filter_keeps_ordinary_characters_verbatim() {
        let name = "klasse 7 - 'bath tub' (ä/ß) #1";
        let query = find_by_name_query(&Ontology::default(), name).unwrap();
        let text = render_select(&query).unwrap();
        assert!(text.contains(&format!("FILTER(?name = \"{}\")", name)));
    }

    #[test]
    fn test_filter_escapes_quotes_and_backslashes() {
        let name = r#"x") } DROP ALL #\"#;
        let query = find_by_name_query(&Ontology::default(), name).unwrap();
        let text = render_select(&query).unwrap();
        assert!(text.contains(r#"FILTER(?name = "x\") } DROP ALL #\\")"#));
    }

    #[test]
    fn test_escape_literal_control_characters() {
        assert_eq!(escape_literal("a\nb\tc\rd"), "a\\nb\\tc\\rd");
        assert_eq!(escape_literal("plain"), "plain");
    }

    #[test]
    fn test_render_insert_data() {
        let subject = Term::iri(format!("{}sensor_fault_1", PREFIX));
        let facts = vec![
            Fact::type_assertion(subject.clone(), format!("{}SensorFault", PREFIX)),
            Fact::new(
                subject,
                Term::iri(format!("{}fault_desc", PREFIX)),
                Term::literal("straight, drop - ' bath tub'"),
            ),
        ];

        let text = render_insert_data(&facts).unwrap();
        assert_eq!(
            text,
            format!(
                "INSERT DATA {{\n    \
                 <{p}sensor_fault_1> a <{p}SensorFault> .\n    \
                 <{p}sensor_fault_1> <{p}fault_desc> \"straight, drop - ' bath tub'\" .\n}}",
                p = PREFIX
            )
        );
    }

    #[test]
    fn test_render_rejects_bad_iri() {
        let facts = vec![Fact::new(
            Term::iri("urn:a b"),
            Term::iri("urn:p"),
            Term::literal("o"),
        )];
        assert!(matches!(
            render_insert_data(&facts),
            Err(StoreError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_render_rejects_literal_predicate() {
        let facts = vec![Fact::new(
            Term::iri("urn:a"),
            Term::literal("p"),
            Term::literal("o"),
        )];
        assert!(render_insert_data(&facts).is_err());
    }

    #[test]
    fn test_render_select_requires_variables() {
        let query = SelectQuery::default();
        assert!(render_select(&query).is_err());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let ontology = Ontology::default();
        let a = render_select(&find_by_name_query(&ontology, "class_1").unwrap()).unwrap();
        let b = render_select(&find_by_name_query(&ontology, "class_1").unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
