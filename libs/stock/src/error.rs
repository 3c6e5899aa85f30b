use thiserror::Error;

/// Failure of a whole quote batch. Per-symbol misses are not errors.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote provider error {code}: {description}")]
    Api { code: String, description: String },

    #[error("invalid quote api base url: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = QuoteError::Api {
            code: "Bad Request".to_string(),
            description: "Missing value for the \"symbols\" argument".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "quote provider error Bad Request: Missing value for the \"symbols\" argument"
        );
    }
}
