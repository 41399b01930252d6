//! Error taxonomy.

/// Convenience result type used across visim.
pub type VisimResult<T> = Result<T, VisimError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The compositors themselves are total functions and never fail; errors are
/// reserved for construction-time catalog mismatches, caller-state
/// validation, and backend I/O.
#[derive(thiserror::Error, Debug)]
pub enum VisimError {
    /// Invalid caller-provided simulation state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Condition catalog and shader program disagree (a packaging bug, not a
    /// runtime condition): a generic condition has no uniform slot, or a
    /// slot has no condition.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Errors while applying a program to a frame or driving a GPU pass.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VisimError {
    /// Build a [`VisimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VisimError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`VisimError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_prefix() {
        let e = VisimError::validation("intensity must be finite");
        assert_eq!(e.to_string(), "validation error: intensity must be finite");

        let e = VisimError::catalog("no uniform slot for 'glaucoma'");
        assert!(e.to_string().starts_with("catalog error:"));
    }

    #[test]
    fn anyhow_passthrough_preserves_message() {
        let inner = anyhow::anyhow!("png decode failed");
        let e = VisimError::from(inner);
        assert_eq!(e.to_string(), "png decode failed");
    }
}
