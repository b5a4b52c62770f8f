//! Centralized input validation for the CLI and web API.

/// Maximum number of symptoms in a single triage request (DOS protection)
pub const MAX_SELECTED_SYMPTOMS: usize = 64;

/// Maximum length of one symptom token, in characters
pub const MAX_SYMPTOM_TOKEN_LENGTH: usize = 100;

/// Maximum length of a search query, in characters
pub const MAX_QUERY_LENGTH: usize = 200;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many symptoms: at most {MAX_SELECTED_SYMPTOMS} may be selected")]
    TooManySymptoms,
    #[error("Symptom too long: exceeds {MAX_SYMPTOM_TOKEN_LENGTH} characters")]
    SymptomTooLong,
    #[error("Query too long: exceeds {MAX_QUERY_LENGTH} characters")]
    QueryTooLong,
    #[error("Input contains control characters")]
    ControlCharacters,
}

impl ValidationError {
    /// Stable machine-readable name, used as the API `error_type`
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooManySymptoms => "too_many_symptoms",
            Self::SymptomTooLong => "symptom_too_long",
            Self::QueryTooLong => "query_too_long",
            Self::ControlCharacters => "invalid_characters",
        }
    }
}

fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}

/// Check a list of user-supplied symptom tokens against the input limits.
///
/// # Errors
///
/// Returns `ValidationError::TooManySymptoms` if the list is too long,
/// `ValidationError::SymptomTooLong` if any token is too long, or
/// `ValidationError::ControlCharacters` if any token contains control characters.
pub fn validate_symptom_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<(), ValidationError> {
    if tokens.len() > MAX_SELECTED_SYMPTOMS {
        return Err(ValidationError::TooManySymptoms);
    }

    for token in tokens {
        let token = token.as_ref();
        if token.chars().count() > MAX_SYMPTOM_TOKEN_LENGTH {
            return Err(ValidationError::SymptomTooLong);
        }
        if has_control_chars(token) {
            return Err(ValidationError::ControlCharacters);
        }
    }

    Ok(())
}

/// Check a search query against the input limits.
///
/// # Errors
///
/// Returns `ValidationError::QueryTooLong` if the query is too long, or
/// `ValidationError::ControlCharacters` if it contains control characters.
pub fn validate_query(query: &str) -> Result<(), ValidationError> {
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(ValidationError::QueryTooLong);
    }
    if has_control_chars(query) {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_tokens_within_limits() {
        assert!(validate_symptom_tokens(&["fever", "body aches", "발열"]).is_ok());
        assert!(validate_symptom_tokens::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_too_many_symptoms() {
        let tokens: Vec<String> = (0..=MAX_SELECTED_SYMPTOMS).map(|i| format!("s{i}")).collect();
        assert_eq!(
            validate_symptom_tokens(&tokens),
            Err(ValidationError::TooManySymptoms)
        );
        assert!(validate_symptom_tokens(&tokens[..MAX_SELECTED_SYMPTOMS]).is_ok());
    }

    #[test]
    fn test_token_length_counts_characters() {
        // Korean characters are 3 bytes each; the limit is in characters
        let korean = "열".repeat(MAX_SYMPTOM_TOKEN_LENGTH);
        assert!(validate_symptom_tokens(&[korean.as_str()]).is_ok());

        let long = "a".repeat(MAX_SYMPTOM_TOKEN_LENGTH + 1);
        assert_eq!(
            validate_symptom_tokens(&[long.as_str()]),
            Err(ValidationError::SymptomTooLong)
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            validate_symptom_tokens(&["fev\u{0}er"]),
            Err(ValidationError::ControlCharacters)
        );
        assert_eq!(
            validate_query("tylenol\n"),
            Err(ValidationError::ControlCharacters)
        );
    }

    #[test]
    fn test_query_length() {
        assert!(validate_query(&"q".repeat(MAX_QUERY_LENGTH)).is_ok());
        assert_eq!(
            validate_query(&"q".repeat(MAX_QUERY_LENGTH + 1)),
            Err(ValidationError::QueryTooLong)
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ValidationError::TooManySymptoms.kind(), "too_many_symptoms");
        assert_eq!(ValidationError::QueryTooLong.kind(), "query_too_long");
    }
}
