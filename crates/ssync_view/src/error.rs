//! Error types for the diagram viewer.

/// Errors from parsing a [`DiagramStyle`](crate::DiagramStyle).
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The TOML content could not be parsed.
    #[error("failed to parse diagram style: {0}")]
    ParseError(String),

    /// A style value is out of range.
    #[error("invalid diagram style: {0}")]
    ValidationError(String),
}

/// Errors while showing a diagram on the terminal.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Terminal setup, drawing or event polling failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The style was rejected before drawing.
    #[error(transparent)]
    Style(#[from] StyleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_style_errors() {
        let err = StyleError::ParseError("expected '=' at line 1".into());
        assert_eq!(
            err.to_string(),
            "failed to parse diagram style: expected '=' at line 1"
        );
        let err = StyleError::ValidationError("samples_per_period must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid diagram style: samples_per_period must be positive"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "no tty");
        let err: ViewError = io.into();
        assert!(err.to_string().starts_with("terminal I/O failed:"));
    }

    #[test]
    fn style_error_passes_through() {
        let err: ViewError = StyleError::ValidationError("width must be positive".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid diagram style: width must be positive"
        );
    }
}
