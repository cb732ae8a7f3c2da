//! Integration tests for the Classifier

#[cfg(test)]
mod tests {
    use crate::{
        render_class_table, render_signal, ClassificationRequest, Classifier, ClassifierConfig,
        ClassifierError, ImagePayload, PromptBuilder, SignalPayload, Signals, Taxonomy,
    };
    use proptest::prelude::*;
    use saliency_domain::{ClassDescription, ContentBlock};
    use saliency_llm::MockProvider;
    use saliency_store::{ClassWriter, MemoryStore, Ontology};

    fn populated_store() -> MemoryStore {
        let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
        writer
            .write_all(Taxonomy::builtin().unwrap().classes())
            .unwrap();
        writer.into_inner()
    }

    fn classifier(
        llm: MockProvider,
        config: ClassifierConfig,
    ) -> Classifier<MockProvider, MemoryStore> {
        Classifier::new(llm, populated_store(), Ontology::default(), config)
    }

    fn medoids() -> ClassificationRequest {
        ClassificationRequest::new(SignalPayload::Numeric(Signals::from_rows(vec![
            vec![0.0, 0.1, -4.2, -4.1, 0.05],
            vec![0.0, 6.3, -480.0, -482.5, -481.9],
        ])))
    }

    #[test]
    fn test_full_classification_flow() {
        let llm = MockProvider::new(
            "signal 1 drops and returns: bath tub\nsignal 2 peaks then crashes\nCLASSIFICATION: class_7, class_2",
        )
        .with_model("o3-2025-04-16");
        let classifier = classifier(llm, ClassifierConfig::default());

        let outcome = classifier.classify(&medoids()).unwrap();

        assert_eq!(outcome.result.class_names, vec!["class_7", "class_2"]);
        let matched: Vec<&str> = outcome.matches.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(matched, vec!["class_7", "class_2"]);
        assert!(outcome.matches[0].description.contains("bath tub"));
        assert!(outcome.unmatched.is_empty());

        assert_eq!(outcome.metadata.model_name, "o3-2025-04-16");
        assert_eq!(outcome.metadata.class_count, 12);
        assert_eq!(outcome.metadata.signal_count, 2);
        assert!(outcome.metadata.prompt_chars > 0);
    }

    #[test]
    fn test_prompt_sent_to_llm_carries_taxonomy_and_signals() {
        let llm = MockProvider::new("CLASSIFICATION: class_1");
        let classifier = classifier(llm.clone(), ClassifierConfig::default());

        classifier.classify(&medoids()).unwrap();

        let sent = llm.last_message().unwrap().text();
        assert_eq!(
            sent.lines().filter(|line| line.starts_with("class_")).count(),
            12
        );
        assert!(sent.contains("signal 2:\n0.0 6.3 -480.0 -482.5 -481.9"));
        assert!(sent.contains("CLASSIFICATION:"));
    }

    #[test]
    fn test_unknown_class_is_reported_unmatched() {
        let llm = MockProvider::new("reasoning\nCLASSIFICATION: class_4, class_99");
        let classifier = classifier(llm, ClassifierConfig::default());

        let outcome = classifier.classify(&medoids()).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].name, "class_4");
        assert_eq!(outcome.unmatched, vec!["class_99".to_string()]);
    }

    #[test]
    fn test_missing_sentinel_is_an_error() {
        let llm = MockProvider::new("I believe this is\nclass_7");
        let classifier = classifier(llm, ClassifierConfig::default());

        let result = classifier.classify(&medoids());
        assert!(matches!(result, Err(ClassifierError::MissingSentinel { .. })));
    }

    #[test]
    fn test_last_line_mode() {
        let llm = MockProvider::new("I believe this is\nclass_7");
        let classifier = classifier(llm, ClassifierConfig::last_line());

        let outcome = classifier.classify(&medoids()).unwrap();
        assert_eq!(outcome.result.answer_line, "class_7");
        assert_eq!(outcome.matches[0].severity, "X");
    }

    #[test]
    fn test_llm_error_propagates() {
        let mut llm = MockProvider::default();
        let classifier = classifier(llm.clone(), ClassifierConfig::default());

        let prompt = classifier
            .build_classification_prompt(&medoids())
            .unwrap()
            .text();
        llm.add_error(prompt);

        let result = classifier.classify(&medoids());
        assert!(matches!(result, Err(ClassifierError::Llm(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_llm_call() {
        let llm = MockProvider::new("CLASSIFICATION: class_1");
        let config = ClassifierConfig {
            sentinel: String::new(),
            ..ClassifierConfig::default()
        };
        let classifier = classifier(llm.clone(), config);

        assert!(matches!(
            classifier.classify(&medoids()),
            Err(ClassifierError::Config(_))
        ));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_empty_store_still_builds_prompt() {
        let llm = MockProvider::new("CLASSIFICATION: class_1");
        let classifier = Classifier::new(
            llm,
            MemoryStore::new(),
            Ontology::default(),
            ClassifierConfig::default(),
        );

        let outcome = classifier.classify(&medoids()).unwrap();
        assert_eq!(outcome.metadata.class_count, 0);
        assert_eq!(outcome.unmatched, vec!["class_1".to_string()]);
    }

    #[test]
    fn test_image_classification_prompt() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let request = ClassificationRequest::new(SignalPayload::Images(vec![
            ImagePayload::from_png_bytes(png).unwrap(),
        ]));
        let classifier = classifier(MockProvider::default(), ClassifierConfig::default());

        let message = classifier.build_classification_prompt(&request).unwrap();
        assert_eq!(message.image_count(), 1);
        assert!(matches!(&message.content[0], ContentBlock::Text(t) if t.contains("class_12: quick, intense peak")));
        assert_eq!(classifier.llm_provider().call_count(), 0);
    }

    #[test]
    fn test_describe_returns_full_text() {
        let llm = MockProvider::new("signal 1: flat, then a dip at index 2\nsignal 2: peak at 1, crash");
        let classifier = classifier(llm.clone(), ClassifierConfig::default());

        let signals = Signals::from_rows(vec![vec![1.0, 1.0, 0.2], vec![0.0, 5.0, -500.0]]);
        let text = classifier.describe(&signals).unwrap();

        assert!(text.contains("dip at index 2"));
        assert!(llm
            .last_message()
            .unwrap()
            .text()
            .starts_with("There is a number of signals:"));
    }

    #[test]
    fn test_describe_rejects_empty_input() {
        let classifier = classifier(MockProvider::default(), ClassifierConfig::default());
        let result = classifier.describe(&Signals::from_rows(Vec::new()));
        assert!(matches!(result, Err(ClassifierError::Payload(_))));
    }

    #[test]
    fn test_describe_rejects_blank_response() {
        let classifier = classifier(MockProvider::new("  \n"), ClassifierConfig::default());
        let result = classifier.describe(&Signals::from_rows(vec![vec![1.0]]));
        assert!(matches!(result, Err(ClassifierError::EmptyResponse)));
    }

    fn class_strategy() -> impl Strategy<Value = ClassDescription> {
        ("[a-z][a-z0-9_]{0,15}", "[^\r\n]{0,60}").prop_map(|(name, description)| {
            ClassDescription { name, description }
        })
    }

    proptest! {
        /// Property: one "name: description" line per class, in order
        #[test]
        fn test_class_table_lines(classes in prop::collection::vec(class_strategy(), 1..20)) {
            let table = render_class_table(&classes);
            let lines: Vec<&str> = table.split('\n').collect();

            prop_assert_eq!(lines.len(), classes.len());
            for (line, class) in lines.iter().zip(&classes) {
                prop_assert_eq!(*line, format!("{}: {}", class.name, class.description));
            }
        }

        /// Property: prompt assembly is byte-identical for identical inputs
        #[test]
        fn test_prompt_determinism(
            classes in prop::collection::vec(class_strategy(), 0..8),
            rows in prop::collection::vec(prop::collection::vec(-1000.0f64..1000.0, 1..16), 1..4),
        ) {
            let builder = PromptBuilder::new(&ClassifierConfig::default());
            let payload = SignalPayload::Numeric(Signals::from_rows(rows));
            prop_assert_eq!(
                builder.classification(&classes, &payload),
                builder.classification(&classes, &payload)
            );
        }

        /// Property: rendered samples keep their count and parse back within rounding
        #[test]
        fn test_signal_rendering_precision(samples in prop::collection::vec(-1.0e6f64..1.0e6, 0..32)) {
            let text = render_signal(&samples, 2);
            let parsed: Vec<f64> = text
                .split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect();

            prop_assert_eq!(parsed.len(), samples.len());
            for (rendered, original) in parsed.iter().zip(&samples) {
                prop_assert!((rendered - original).abs() <= 0.005 + 1e-9);
            }
        }
    }
}
