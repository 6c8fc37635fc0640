use thiserror::Error;

/// vendas-tui error types
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Network or HTTP-status failure talking to the sales API
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON array
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for vendas-tui
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Parse("expected array".into());
        assert_eq!(err.to_string(), "parse error: expected array");
    }
}
