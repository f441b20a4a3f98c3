//! Error type shared by the tree, the collector and the title applier.

use std::io;

/// Everything that can go wrong while mounting, collecting or writing a title.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// No component is mounted at this index.
    #[error("no component mounted at index {0}")]
    UnknownComponent(usize),

    /// A component with this id is already mounted.
    #[error("component id `{0}` is already mounted")]
    DuplicateId(String),

    /// A declared field (or a whole computed declaration) failed to resolve.
    #[error("failed to resolve meta field `{field}` on component `{component}`: {source}")]
    Resolve {
        component: String,
        field: String,
        #[source]
        source: Box<MetaError>,
    },

    /// `titleTemplate` resolved to something other than a string.
    #[error("title template must be a string, got {0}")]
    InvalidTemplate(String),

    /// The title sink rejected the write.
    #[error("failed to write title: {0}")]
    Sink(#[from] io::Error),

    /// Raised by user-supplied computed fields.
    #[error("{0}")]
    Custom(String),
}

impl MetaError {
    /// Build a [`MetaError::Custom`] from anything printable.
    pub fn custom(message: impl Into<String>) -> Self {
        MetaError::Custom(message.into())
    }
}

pub type Result<T, E = MetaError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_resolve_error_chains_source() {
        let err = MetaError::Resolve {
            component: "page".to_string(),
            field: "title".to_string(),
            source: Box::new(MetaError::custom("boom")),
        };

        assert_eq!(
            err.to_string(),
            "failed to resolve meta field `title` on component `page`: boom"
        );
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_io_error_converts_to_sink() {
        let err: MetaError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, MetaError::Sink(_)));
    }
}
