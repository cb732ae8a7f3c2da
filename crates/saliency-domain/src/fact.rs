//! RDF statements written to the fact store

/// IRI of the `rdf:type` predicate
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// A node or value in an RDF statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// Absolute IRI, stored without angle brackets
    Iri(String),
    /// Plain string literal, stored unescaped
    Literal(String),
}

impl Term {
    /// Create an IRI term
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Create a literal term
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// The lexical value (IRI text or literal text)
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(v) | Term::Literal(v) => v,
        }
    }
}

/// One (subject, predicate, object) statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fact {
    /// Subject node
    pub subject: Term,
    /// Predicate IRI
    pub predicate: Term,
    /// Object node or literal
    pub object: Term,
}

impl Fact {
    /// Create a statement
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Create an `rdf:type` statement
    pub fn type_assertion(subject: Term, class_iri: impl Into<String>) -> Self {
        Self::new(subject, Term::iri(RDF_TYPE), Term::iri(class_iri))
    }
}
