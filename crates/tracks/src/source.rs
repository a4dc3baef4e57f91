use async_trait::async_trait;
use model::track::ParsedTrack;

use crate::RequestResult;

/// Fetches and reads the flight log behind a submitted url.
///
/// Implementations report every failure to retrieve or read the log as
/// `RequestError::ParseError`.
#[async_trait]
pub trait TrackSource {
    async fn fetch_track(&self, url: &str) -> RequestResult<ParsedTrack>;
}
