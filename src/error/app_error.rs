use thiserror::Error;

/// Library errors. Every failure is raised at the point of detection and is
/// never retried internally; the caller decides whether to retry.
#[derive(Error, Debug)]
pub enum AppError {
    /// A caller argument has the wrong basic shape, e.g. an appid that is not
    /// a decimal integer.
    #[error("invalid argument type: {0}")]
    InvalidArgumentType(String),

    /// An enumerated argument is outside its fixed set of allowed values, or
    /// an appid is not in the Steam app catalog.
    #[error("invalid argument value: {0}")]
    InvalidArgumentValue(String),

    /// Steam answered with an explicit negative `success` indicator, or with
    /// the `null` body it uses to signal the request limit.
    #[error("steam rejected the request: {0}")]
    RemoteRejection(String),

    /// No valid session cookie has been established, or the probe request
    /// used to validate one failed.
    #[error("session not authorized: {0}")]
    SessionUnauthorized(String),

    /// The caller asked for more records in one page than Steam reports as
    /// available.
    #[error("requested count {requested} exceeds the available total {available}")]
    RequestExceedsAvailable { requested: u32, available: u64 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed json body: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
