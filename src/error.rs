use thiserror::Error;

/// Programmer-error and configuration-error taxonomy.
///
/// Search exhaustion ("no atlas size fits") is not represented here — it is reported as
/// `PackResult::is_valid == false`, a normal value, not an error.
#[derive(Debug, Error)]
pub enum TexPackerError {
    #[error("invalid input: source image list must not be null when calling try_process")]
    NullInput,

    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, TexPackerError>;
