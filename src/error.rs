use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the chain-reaction engine and its configuration layer.
///
/// The engine never panics on bad input: configuration problems are rejected
/// where they enter, and numerical pathologies inside a tick surface as
/// `MathError` instead of leaking NaN into the particle state.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value or particle invariant.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numerical issue (division by zero, non-finite vector result).
    #[error("numerical error: {0}")]
    MathError(String),

    /// Malformed YAML configuration.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Propagated I/O errors (reading configuration files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("lattice_spacing must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("lattice_spacing"));
    }

    #[test]
    fn math_error_display() {
        let e = Error::MathError("division by zero".into());
        assert!(e.to_string().starts_with("numerical error"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let e: Error = io.into();
        assert!(e.to_string().contains("missing.yaml"));
    }

    #[test]
    fn result_type_alias_compiles() -> Result<()> {
        Ok(())
    }
}
