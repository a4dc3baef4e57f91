use std::{error::Error, fmt, time::Duration};

use model::track::UnknownTrackField;

pub mod resolver;
pub mod source;
pub mod store;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The id was well formed but nothing has been stored under it.
    NotFound,
    InvalidId(String),
    UnknownField(String),
    /// The track source could not fetch or read the referenced flight log.
    ParseError(String),
    Timeout(Duration),
    MalformedRequest(String),
}

impl RequestError {
    pub fn parse_error<T: Error>(why: T) -> Self {
        Self::ParseError(why.to_string())
    }
}

impl Error for RequestError {}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::NotFound => write!(f, "The requested item does not exist."),
            RequestError::InvalidId(id) => write!(f, "Invalid track id: {}", id),
            RequestError::UnknownField(field) => write!(f, "Unknown field: {}", field),
            RequestError::ParseError(why) => {
                write!(f, "Could not read the track: {}", why)
            }
            RequestError::Timeout(after) => write!(
                f,
                "Reading the track took longer than {} seconds.",
                after.as_secs_f64()
            ),
            RequestError::MalformedRequest(why) => write!(f, "Malformed request: {}", why),
        }
    }
}

impl From<UnknownTrackField> for RequestError {
    fn from(value: UnknownTrackField) -> Self {
        Self::UnknownField(value.0)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
