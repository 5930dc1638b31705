use crate::error::ApiError;

/// Maximum text length for generation requests, in characters
const MAX_TEXT_LENGTH: usize = 5000;

/// Validate a generation request
pub fn validate_generate_request(text: &str) -> Result<(), ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("Text cannot be empty".to_string()));
    }
    // Character count, not byte length: Bengali text is multi-byte in UTF-8
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_generate_request_valid() {
        assert!(validate_generate_request("আমার সোনার বাংলা").is_ok());
        assert!(validate_generate_request("Hello").is_ok());
    }

    #[test]
    fn test_validate_generate_request_empty_text() {
        let result = validate_generate_request("");
        assert!(result.is_err());
        if let Err(ApiError::InvalidInput(msg)) = result {
            assert!(msg.contains("empty"));
        }

        let result = validate_generate_request("   \n ");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_generate_request_too_long() {
        let long_text = "অ".repeat(6000);
        let result = validate_generate_request(&long_text);
        assert!(result.is_err());
        if let Err(ApiError::InvalidInput(msg)) = result {
            assert!(msg.contains("too long"));
        }
    }

    #[test]
    fn test_length_limit_counts_characters_not_bytes() {
        // 5000 Bengali characters is 15000 bytes but still within the limit
        let text = "ক".repeat(5000);
        assert!(validate_generate_request(&text).is_ok());
    }
}
