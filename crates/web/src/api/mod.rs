use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};
use chrono::Duration;
use model::service::ServiceInfo;
use tower_http::trace::TraceLayer;

pub mod track;

use crate::{
    common::{route_method_not_allowed, route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(service_info).fallback(route_method_not_allowed))
        .route(
            "/schema",
            get(schema::<ServiceInfo>).fallback(route_method_not_allowed),
        )
        .nest_service("/track", track::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn service_info(
    State(WebState { started, .. }): State<WebState>,
) -> Json<ServiceInfo> {
    let uptime = Duration::from_std(started.elapsed()).unwrap_or_else(|_| Duration::zero());
    Json(ServiceInfo::with_uptime(uptime))
}
