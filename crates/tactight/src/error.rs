use tactight_core::CalibrationError;
use tactight_fetch::GenerateError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("please fill in all fields")]
    MissingInput,

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Archive(#[from] tactight_archive::Error),

    #[error(transparent)]
    Download(#[from] tactight_fs::Error),

    #[error(transparent)]
    Setup(#[from] tactight_fetch::Error),

    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid proxy URL {url:?}: {reason}")]
    InvalidProxy { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
