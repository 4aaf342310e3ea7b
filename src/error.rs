use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageOptimError {
    #[error("A username must be supplied")]
    MissingUsername,

    #[error("You must supply a width or width and height, not just a height")]
    HeightWithoutWidth,

    #[error("The {0} must be a positive number of pixels")]
    ZeroDimension(&'static str),

    #[error("The timeout must be longer than zero")]
    ZeroTimeout,

    #[error("You must supply a crop X focal point if you supply a crop Y focal point")]
    CropYWithoutX,

    #[error("Do not preface the background color value with a #: {0}")]
    BgColorHash(String),

    #[error("You must supply the background color in three or six hex digits: {0}")]
    BgColorLength(String),

    #[error("Invalid {kind} value: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unable to determine type of file: {0}")]
    UnknownContentType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which phase rejected the call, before any bytes were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
}

impl ImageOptimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageOptimError::MissingUsername
            | ImageOptimError::HeightWithoutWidth
            | ImageOptimError::ZeroDimension(_)
            | ImageOptimError::ZeroTimeout
            | ImageOptimError::CropYWithoutX
            | ImageOptimError::BgColorHash(_)
            | ImageOptimError::BgColorLength(_)
            | ImageOptimError::InvalidValue { .. } => ErrorKind::Configuration,
            ImageOptimError::FileNotFound(_)
            | ImageOptimError::UnknownContentType(_)
            | ImageOptimError::Io(_) => ErrorKind::Input,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_input(&self) -> bool {
        self.kind() == ErrorKind::Input
    }
}

pub type Result<T> = std::result::Result<T, ImageOptimError>;
