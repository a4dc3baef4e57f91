use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use model::track::{TrackFieldValue, TrackReference, TrackSummary};
use serde::{Deserialize, Serialize};
use tracks::{resolver::parse_id, RequestError};
use utility::{id::Id, let_also::LetAlso};

use crate::{
    common::{
        route_malformed, route_method_not_allowed, schema, RouteErrorResponse,
        RouteResult, METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route(
            "/",
            get(get_tracks)
                .post(post_track)
                .fallback(route_method_not_allowed),
        )
        .route(
            "/schema",
            get(schema::<TrackSummary>).fallback(route_method_not_allowed),
        )
        .route("/:id", get(get_track).fallback(route_method_not_allowed))
        .route(
            "/:id/:field",
            get(get_track_field).fallback(route_method_not_allowed),
        )
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_malformed))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTrack {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedTrack {
    pub id: Id<TrackReference>,
}

async fn post_track(
    State(WebState { store, .. }): State<WebState>,
    WithRejection(Json(body), _): WithRejection<Json<SubmitTrack>, RouteErrorResponse>,
) -> Json<SubmittedTrack> {
    let id = store.add(body.url.clone()).await;
    log::info!("stored track {} for {}", id, body.url);
    Json(SubmittedTrack { id })
}

async fn get_tracks(
    State(WebState { store, .. }): State<WebState>,
) -> Json<Vec<Id<TrackReference>>> {
    store.list().await.let_owned(Json)
}

async fn get_track(
    OriginalUri(original_uri): OriginalUri,
    WithRejection(Path(id), _): WithRejection<Path<String>, RouteErrorResponse>,
    State(WebState { resolver, .. }): State<WebState>,
) -> RouteResult<Json<TrackSummary>> {
    let to_response = |why: RequestError| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    };
    let id = parse_id(&id).map_err(to_response)?;
    resolver
        .resolve_summary(id)
        .await
        .map(Json)
        .map_err(to_response)
}

async fn get_track_field(
    OriginalUri(original_uri): OriginalUri,
    WithRejection(Path((id, field)), _): WithRejection<
        Path<(String, String)>,
        RouteErrorResponse,
    >,
    State(WebState { resolver, .. }): State<WebState>,
) -> RouteResult<Json<TrackFieldValue>> {
    let to_response = |why: RequestError| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    };
    let id = parse_id(&id).map_err(to_response)?;
    resolver
        .resolve_field(id, &field)
        .await
        .map(Json)
        .map_err(to_response)
}
