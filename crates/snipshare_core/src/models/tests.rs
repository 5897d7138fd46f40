//! Model-level unit tests.

#[cfg(test)]
mod model_tests {
    use super::super::*;
    use crate::constants::DEFAULT_LANGUAGE;
    use crate::error::AppError;
    use chrono::{Duration, Utc};

    fn shared(expires_at: Option<chrono::DateTime<Utc>>) -> share::SharedSnippet {
        share::SharedSnippet {
            share_id: "aB3dE5gH".to_string(),
            content: "print('hi')".to_string(),
            language: "python".to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_normalize_language_defaults_blank_to_plaintext() {
        let cases = [
            (None, DEFAULT_LANGUAGE),
            (Some(""), DEFAULT_LANGUAGE),
            (Some("   "), DEFAULT_LANGUAGE),
            (Some(" python "), "python"),
            (Some("Not-A-Real-Language"), "Not-A-Real-Language"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                snippet::normalize_language(input),
                expected,
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_require_non_blank_names_the_field() {
        let err = snippet::require_non_blank("Title", " \n\t").expect_err("blank must fail");
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("Title")));
        assert!(snippet::require_non_blank("Title", " x ").is_ok());
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        assert!(!shared(None).is_expired_at(now + Duration::days(36_500)));
        assert!(!shared(Some(now)).is_expired_at(now));
        assert!(shared(Some(now)).is_expired_at(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_share_url_joins_without_double_slash() {
        assert_eq!(
            share::share_url("http://h:1/api/snippets/", "abcd1234"),
            "http://h:1/api/snippets/abcd1234"
        );
        assert_eq!(
            share::share_url("https://s.example", "abcd1234"),
            "https://s.example/abcd1234"
        );
    }

    #[test]
    fn test_summary_projection_drops_content() {
        let now = Utc::now();
        let record = snippet::Snippet {
            id: 7,
            title: "hello".to_string(),
            language: "rust".to_string(),
            content: "fn main() {}".to_string(),
            created_at: now,
            updated_at: now,
        };
        let summary = snippet::SnippetSummary::from(&record);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.title, "hello");
        assert_eq!(summary.updated_at, now);
    }
}
