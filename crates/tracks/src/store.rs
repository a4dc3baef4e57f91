use std::sync::Arc;

use model::track::TrackReference;
use tokio::sync::RwLock;
use utility::id::Id;

use crate::{RequestError, RequestResult};

/// In-memory registry of submitted track urls.
///
/// The id of a reference is its position in the registry, so ids start at 0,
/// are handed out in order and are never reused. Clones share the same
/// registry.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    urls: Arc<RwLock<Vec<String>>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add<S: Into<String>>(&self, url: S) -> Id<TrackReference> {
        let mut urls = self.urls.write().await;
        let id = urls.len();
        urls.push(url.into());
        Id::new(id)
    }

    pub async fn list(&self) -> Vec<Id<TrackReference>> {
        let count = self.urls.read().await.len();
        (0..count).map(Id::new).collect()
    }

    pub async fn get(&self, id: Id<TrackReference>) -> RequestResult<TrackReference> {
        self.urls
            .read()
            .await
            .get(id.raw())
            .map(|url| TrackReference {
                id,
                url: url.clone(),
            })
            .ok_or(RequestError::NotFound)
    }
}
