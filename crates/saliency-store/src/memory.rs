//! In-memory fact store
//!
//! Evaluates structured SELECT queries directly over a statement list. Used
//! for tests and dry runs where no Fuseki server is available.

use crate::sparql::{render_insert_data, render_select};
use crate::StoreError;
use saliency_domain::traits::FactStore;
use saliency_domain::{Fact, PatternTerm, Row, SelectQuery, Term, TriplePattern};
use std::collections::BTreeMap;

type Binding = BTreeMap<String, Term>;

/// Fact store holding its statements in a `Vec`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    facts: Vec<Fact>,
    insert_count: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All statements, in insertion order
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Number of stored statements
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the store holds no statements
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Number of `insert` calls served
    pub fn insert_count(&self) -> usize {
        self.insert_count
    }
}

impl FactStore for MemoryStore {
    type Error = StoreError;

    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, Self::Error> {
        // Same validation as the text path.
        render_select(query)?;

        let mut solutions: Vec<Binding> = vec![Binding::new()];
        for pattern in &query.patterns {
            solutions = solutions
                .iter()
                .flat_map(|binding| {
                    self.facts
                        .iter()
                        .filter_map(move |fact| extend_binding(binding, pattern, fact))
                })
                .collect();
        }

        solutions.retain(|binding| {
            query.filters.iter().all(|filter| {
                matches!(binding.get(&filter.variable), Some(Term::Literal(v)) if v == &filter.value)
            })
        });

        Ok(solutions
            .into_iter()
            .map(|binding| {
                query
                    .variables
                    .iter()
                    .filter_map(|variable| {
                        binding
                            .get(variable)
                            .map(|term| (variable.clone(), term.value().to_string()))
                    })
                    .collect()
            })
            .collect())
    }

    fn insert(&mut self, facts: &[Fact]) -> Result<(), Self::Error> {
        render_insert_data(facts)?;
        self.facts.extend_from_slice(facts);
        self.insert_count += 1;
        Ok(())
    }
}

fn extend_binding(binding: &Binding, pattern: &TriplePattern, fact: &Fact) -> Option<Binding> {
    let mut extended = binding.clone();
    let positions = [
        (&pattern.subject, &fact.subject),
        (&pattern.predicate, &fact.predicate),
        (&pattern.object, &fact.object),
    ];

    for (position, term) in positions {
        match position {
            PatternTerm::Term(fixed) => {
                if fixed != term {
                    return None;
                }
            }
            PatternTerm::Var(name) => match extended.get(name) {
                Some(bound) if bound != term => return None,
                Some(_) => {}
                None => {
                    extended.insert(name.clone(), term.clone());
                }
            },
        }
    }
    Some(extended)
}
