use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a single annotation document
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("XML write error: {0}")]
    XmlWrite(String),

    #[error("Missing required element <{element}> in <{parent}>")]
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },

    #[error("Invalid number for '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },
}

/// Errors that abort a whole conversion run
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Failed to read image size ({}): {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Directory path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        ConvertError::Format {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
