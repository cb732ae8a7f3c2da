//! Extract the predicted class names from an LLM response

use crate::config::AnswerFormat;
use crate::error::ClassifierError;
use crate::types::ClassificationResult;

/// Last non-empty line of `text`, trimmed
pub fn parse_last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|line| !line.is_empty())
}

/// Parse the answer line according to `format`
///
/// In `Sentinel` mode the last non-empty line must start with `sentinel`;
/// the class names are whatever follows it.
pub fn parse_classification(
    text: &str,
    format: AnswerFormat,
    sentinel: &str,
) -> Result<ClassificationResult, ClassifierError> {
    let last_line = parse_last_line(text).ok_or(ClassifierError::EmptyResponse)?;

    let answer_line = match format {
        AnswerFormat::LastLine => last_line,
        AnswerFormat::Sentinel => {
            let unmarked = last_line.trim_matches('*').trim_start();
            unmarked
                .strip_prefix(sentinel)
                .map(str::trim)
                .ok_or_else(|| ClassifierError::MissingSentinel {
                    sentinel: sentinel.to_string(),
                    last_line: last_line.to_string(),
                })?
        }
    };

    let class_names = split_names(answer_line);
    if class_names.is_empty() {
        return Err(ClassifierError::EmptyAnswer(answer_line.to_string()));
    }

    Ok(ClassificationResult {
        answer_line: answer_line.to_string(),
        class_names,
    })
}

fn split_names(answer_line: &str) -> Vec<String> {
    answer_line
        .split(',')
        .map(|name| {
            name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '`' | '"' | '\'' | '.' | '*'))
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SENTINEL;

    fn parse_sentinel(text: &str) -> Result<ClassificationResult, ClassifierError> {
        parse_classification(text, AnswerFormat::Sentinel, DEFAULT_SENTINEL)
    }

    fn parse_plain(text: &str) -> Result<ClassificationResult, ClassifierError> {
        parse_classification(text, AnswerFormat::LastLine, DEFAULT_SENTINEL)
    }

    #[test]
    fn test_last_line() {
        assert_eq!(parse_last_line("foo\nbar\nclass_3"), Some("class_3"));
        assert_eq!(parse_last_line("class_3"), Some("class_3"));
    }

    #[test]
    fn test_last_line_skips_trailing_blank_lines() {
        assert_eq!(parse_last_line("reasoning\nclass_3\n\n  \n"), Some("class_3"));
        assert_eq!(parse_last_line("a\r\nclass_4\r\n"), Some("class_4"));
    }

    #[test]
    fn test_last_line_of_empty_text() {
        assert_eq!(parse_last_line(""), None);
        assert_eq!(parse_last_line("\n \n"), None);
    }

    #[test]
    fn test_last_line_format_splits_names() {
        let result = parse_plain("signal 1 is flat\nsignal 2 drops\nclass_1, class_6").unwrap();
        assert_eq!(result.answer_line, "class_1, class_6");
        assert_eq!(result.class_names, vec!["class_1", "class_6"]);
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(parse_plain("   "), Err(ClassifierError::EmptyResponse)));
        assert!(matches!(parse_sentinel(""), Err(ClassifierError::EmptyResponse)));
    }

    #[test]
    fn test_sentinel_format() {
        let result = parse_sentinel("looks like a bath tub\nCLASSIFICATION: class_7").unwrap();
        assert_eq!(result.answer_line, "class_7");
        assert_eq!(result.class_names, vec!["class_7"]);
    }

    #[test]
    fn test_sentinel_with_markdown_emphasis() {
        let result = parse_sentinel("reasoning\n**CLASSIFICATION: class_2, class_3**").unwrap();
        assert_eq!(result.class_names, vec!["class_2", "class_3"]);
    }

    #[test]
    fn test_missing_sentinel() {
        match parse_sentinel("I think it is\nclass_7") {
            Err(ClassifierError::MissingSentinel {
                sentinel,
                last_line,
            }) => {
                assert_eq!(sentinel, DEFAULT_SENTINEL);
                assert_eq!(last_line, "class_7");
            }
            other => panic!("Expected MissingSentinel, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_must_be_on_last_line() {
        let result = parse_sentinel("CLASSIFICATION: class_1\nactually, not sure");
        assert!(matches!(result, Err(ClassifierError::MissingSentinel { .. })));
    }

    #[test]
    fn test_sentinel_without_names() {
        let result = parse_sentinel("hmm\nCLASSIFICATION:   ");
        assert!(matches!(result, Err(ClassifierError::EmptyAnswer(_))));
    }

    #[test]
    fn test_names_are_cleaned() {
        let result = parse_plain("`class_3`, \"class_4\", class_5.").unwrap();
        assert_eq!(result.class_names, vec!["class_3", "class_4", "class_5"]);
    }

    #[test]
    fn test_custom_sentinel() {
        let result =
            parse_classification("x\nANSWER => class_9", AnswerFormat::Sentinel, "ANSWER =>")
                .unwrap();
        assert_eq!(result.class_names, vec!["class_9"]);
    }
}
