//! Integration tests for the class writer and reader
//!
//! These tests run the full write-then-read cycle against the in-memory store.

use saliency_domain::AnomalyClass;
use saliency_store::{ClassReader, ClassWriter, MemoryStore, Ontology};

fn taxonomy() -> Vec<AnomalyClass> {
    vec![
        AnomalyClass::new(
            "class_1",
            "no obvious positive / negative peaks; on average, the signal roughly ends how it started",
        ),
        AnomalyClass::new("class_7", "straight, drop, increase, starting and ending the same - ' bath tub'"),
        AnomalyClass::new("class_9", "desc text"),
    ]
}

fn populated_reader() -> ClassReader<MemoryStore> {
    let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
    writer.write_all(&taxonomy()).unwrap();
    ClassReader::new(writer.into_inner(), Ontology::default())
}

#[test]
fn test_round_trip_by_name() {
    let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
    writer
        .write_class(&AnomalyClass::new("class_9", "desc text").with_severity("X"))
        .unwrap();

    let reader = ClassReader::new(writer.into_inner(), Ontology::default());
    let found = reader.find_by_name("class_9").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "class_9");
    assert_eq!(found[0].description, "desc text");
    assert_eq!(found[0].severity, "X");
}

#[test]
fn test_list_all_returns_every_class() {
    let reader = populated_reader();
    let mut names: Vec<String> = reader.list_all().unwrap().into_iter().map(|c| c.name).collect();
    names.sort();
    assert_eq!(names, vec!["class_1", "class_7", "class_9"]);
}

#[test]
fn test_list_descriptions() {
    let reader = populated_reader();
    let descriptions = reader.list_descriptions().unwrap();
    assert_eq!(descriptions.len(), 3);
    assert!(descriptions.iter().any(|d| d.contains("bath tub")));
}

#[test]
fn test_unknown_name_yields_empty_result() {
    let reader = populated_reader();
    assert!(reader.find_by_name("class_42").unwrap().is_empty());
}

#[test]
fn test_name_with_quotes_does_not_break_lookup() {
    let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
    writer
        .write_class(&AnomalyClass::new(r#"odd "quoted" name"#, "still stored"))
        .unwrap();

    let reader = ClassReader::new(writer.into_inner(), Ontology::default());
    let found = reader.find_by_name(r#"odd "quoted" name"#).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "still stored");
}

#[test]
fn test_find_all_by_names_splits_matches() {
    let reader = populated_reader();
    let names = vec!["class_7".to_string(), "class_99".to_string(), "class_1".to_string()];

    let lookup = reader.find_all_by_names(&names).unwrap();
    let matched: Vec<&str> = lookup.matches.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(matched, vec!["class_7", "class_1"]);
    assert_eq!(lookup.unmatched, vec!["class_99".to_string()]);
}

#[test]
fn test_duplicate_names_return_several_rows() {
    let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
    writer.write_class(&AnomalyClass::new("class_2", "first")).unwrap();
    writer.write_class(&AnomalyClass::new("class_2", "second")).unwrap();

    let reader = ClassReader::new(writer.into_inner(), Ontology::default());
    assert_eq!(reader.find_by_name("class_2").unwrap().len(), 2);
}
