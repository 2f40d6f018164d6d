use std::fmt;

/// Errors raised at the edges of the engine, when reading external input.
///
/// Simulation itself never fails.
#[derive(Debug)]
pub enum Error {
    /// A payload could not be decoded.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// A configuration value is out of range.
    InvalidConfig(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "serde")]
            Error::Json(err) => write!(f, "invalid JSON payload: {}", err),
            Error::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "serde")]
            Error::Json(err) => Some(err),
            Error::InvalidConfig(_) => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
