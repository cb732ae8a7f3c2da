//! Structured SELECT queries
//!
//! Queries are kept as data so that a store can either render them to SPARQL
//! text or evaluate them directly.

use crate::fact::Term;
use std::collections::BTreeMap;

/// One result row: variable name (without `?`) to lexical value
pub type Row = BTreeMap<String, String>;

/// A position in a triple pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    /// Variable name, without the leading `?`
    Var(String),
    /// Fixed IRI or literal
    Term(Term),
}

impl PatternTerm {
    /// Variable position
    pub fn var(name: impl Into<String>) -> Self {
        PatternTerm::Var(name.into())
    }

    /// Fixed IRI position
    pub fn iri(value: impl Into<String>) -> Self {
        PatternTerm::Term(Term::iri(value))
    }
}

/// A basic graph pattern element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject position
    pub subject: PatternTerm,
    /// Predicate position
    pub predicate: PatternTerm,
    /// Object position
    pub object: PatternTerm,
}

/// `FILTER(?variable = "value")` with exact string equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualsFilter {
    /// Variable name, without the leading `?`
    pub variable: String,
    /// Literal the variable must equal
    pub value: String,
}

/// A SELECT query over a conjunction of triple patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// Projected variables, in output order
    pub variables: Vec<String>,
    /// Patterns joined on shared variables
    pub patterns: Vec<TriplePattern>,
    /// Equality filters applied after the join
    pub filters: Vec<EqualsFilter>,
}

impl SelectQuery {
    /// Start a query projecting the given variables
    pub fn select<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            patterns: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a triple pattern
    pub fn pattern(mut self, subject: PatternTerm, predicate: PatternTerm, object: PatternTerm) -> Self {
        self.patterns.push(TriplePattern {
            subject,
            predicate,
            object,
        });
        self
    }

    /// Add an exact-match filter
    pub fn filter_eq(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(EqualsFilter {
            variable: variable.into(),
            value: value.into(),
        });
        self
    }
}
