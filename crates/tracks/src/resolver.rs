use std::{sync::Arc, time::Duration};

use model::track::{
    ParsedTrack, TrackField, TrackFieldValue, TrackReference, TrackSummary,
};
use utility::id::Id;

use crate::{source::TrackSource, store::TrackStore, RequestError, RequestResult};

/// Parses a track id from its textual form, e.g. a path segment.
///
/// Negative and non-numeric ids are invalid. Numbers too large to be an
/// index can never have been handed out, so they are not found.
pub fn parse_id(raw: &str) -> RequestResult<Id<TrackReference>> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RequestError::InvalidId(raw.to_owned()));
    }
    digits
        .parse::<usize>()
        .map(Id::new)
        .map_err(|_| RequestError::NotFound)
}

pub fn summarize(track: &ParsedTrack) -> TrackSummary {
    TrackSummary {
        h_date: track.date.format("%Y-%m-%d").to_string(),
        pilot: track.pilot.clone(),
        glider: track.glider_type.clone(),
        glider_id: track.glider_id.clone(),
        track_length: track.length_km(),
    }
}

/// Turns stored track references into summaries.
///
/// Nothing is cached: every call fetches and reads the flight log again.
#[derive(Clone)]
pub struct TrackInfoResolver {
    store: TrackStore,
    source: Arc<dyn TrackSource + Send + Sync>,
    timeout: Duration,
}

impl TrackInfoResolver {
    pub fn new<S>(store: TrackStore, source: S, timeout: Duration) -> Self
    where
        S: TrackSource + Send + Sync + 'static,
    {
        Self {
            store,
            source: Arc::new(source),
            timeout,
        }
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub async fn resolve_track(&self, id: Id<TrackReference>) -> RequestResult<ParsedTrack> {
        let reference = self.store.get(id).await?;
        log::debug!("fetching track {} from {}", reference.id, reference.url);
        tokio::time::timeout(self.timeout, self.source.fetch_track(&reference.url))
            .await
            .map_err(|_| RequestError::Timeout(self.timeout))?
    }

    pub async fn resolve_summary(
        &self,
        id: Id<TrackReference>,
    ) -> RequestResult<TrackSummary> {
        self.resolve_track(id)
            .await
            .map(|track| summarize(&track))
            .map_err(|why| {
                log::warn!("could not resolve track {}: {}", id, why);
                why
            })
    }

    /// Unknown field names are rejected before the track is fetched.
    pub async fn resolve_field(
        &self,
        id: Id<TrackReference>,
        field: &str,
    ) -> RequestResult<TrackFieldValue> {
        let field: TrackField = field.parse()?;
        self.resolve_summary(id)
            .await
            .map(|summary| summary.field(field))
    }
}
