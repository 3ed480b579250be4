//! Rate-limit detection.

/// The phrase that marks an error as a rate limit.
const RATE_LIMIT_PHRASE: &str = "rate limit";

/// Decide whether an error message describes a rate limit.
///
/// The message is lowercased and underscores become spaces before looking
/// for the phrase `"rate limit"`. So `"Rate Limit exceeded"`, `"RATE_LIMIT"`
/// and `"429: rate limit"` all match, while `"ratelimit"` does not.
///
/// # Examples
///
/// ```rust
/// use playground_core::retry::is_rate_limit_error;
///
/// assert!(is_rate_limit_error("rate_limit_error: slow down"));
/// assert!(!is_rate_limit_error("ratelimit"));
/// ```
pub fn is_rate_limit_error(message: &str) -> bool {
    message
        .to_lowercase()
        .replace('_', " ")
        .contains(RATE_LIMIT_PHRASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("rate limit", true)]
    #[case("Rate Limit exceeded", true)]
    #[case("RATE_LIMIT", true)]
    #[case("Error code: 429 - {'type': 'rate_limit_error'}", true)]
    #[case("you hit the RaTe_LiMiT, try later", true)]
    #[case("ratelimit", false)]
    #[case("rate-limit", false)]
    #[case("rate  limit", false)]
    #[case("connection reset by peer", false)]
    #[case("", false)]
    fn test_classification(#[case] message: &str, #[case] expected: bool) {
        assert_eq!(is_rate_limit_error(message), expected, "message: {message:?}");
    }

    proptest! {
        #[test]
        fn prop_phrase_anywhere_matches(
            prefix in "[a-z0-9 :]{0,16}",
            suffix in "[a-z0-9 :]{0,16}",
            upper in any::<bool>(),
            underscore in any::<bool>(),
        ) {
            let mut phrase = if underscore { "rate_limit".to_string() } else { "rate limit".to_string() };
            if upper {
                phrase = phrase.to_uppercase();
            }
            let message = format!("{prefix}{phrase}{suffix}");
            prop_assert!(is_rate_limit_error(&message));
        }

        #[test]
        fn prop_messages_without_rate_never_match(message in "[b-z _]{0,40}") {
            // no 'a' means "rate" can never appear
            prop_assert!(!is_rate_limit_error(&message));
        }
    }
}
