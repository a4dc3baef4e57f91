use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Query, Request,
    },
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};
use tracks::RequestError;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    log::debug!("no route for {} {}", req.method(), original_uri.path());
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

/// Fallback for paths which start like a known resource but have the wrong shape.
pub(crate) async fn route_malformed(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    log::debug!("malformed path {} {}", req.method(), original_uri.path());
    RouteErrorResponse::from(RequestError::MalformedRequest(
        "unexpected path shape".to_owned(),
    ))
    .with_method(req.method())
    .with_uri(original_uri.path())
}

/// Fallback for known resources requested with an unsupported method.
pub(crate) async fn route_method_not_allowed(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    log::debug!("method not allowed {} {}", req.method(), original_uri.path());
    RouteErrorResponse::method_not_allowed(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_information: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            kind: None,
            http_method: None,
            requested_uri: None,
            message: None,
            detailed_information: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_kind("notFound")
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn method_not_allowed(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED)
            .with_kind("methodNotAllowed")
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("i dunno what happened here :/");
        self.with_message(message)
    }

    pub fn with_detailed_information(mut self, message: impl Into<String>) -> Self {
        self.detailed_information = Some(message.into());
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        let (status_code, kind) = match &value {
            RequestError::NotFound => (StatusCode::NOT_FOUND, "notFound"),
            RequestError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalidId"),
            RequestError::UnknownField(_) => (StatusCode::BAD_REQUEST, "unknownField"),
            RequestError::MalformedRequest(_) => {
                (StatusCode::BAD_REQUEST, "malformedRequest")
            }
            RequestError::ParseError(_) => (StatusCode::BAD_GATEWAY, "parseError"),
            RequestError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
        };
        Self::new(status_code)
            .with_kind(kind)
            .with_message(value.to_string())
    }
}

impl From<JsonRejection> for RouteErrorResponse {
    fn from(value: JsonRejection) -> Self {
        Self::from(RequestError::MalformedRequest(
            "the request body is not valid json.".to_owned(),
        ))
        .with_detailed_information(value.body_text())
    }
}

impl From<PathRejection> for RouteErrorResponse {
    fn from(value: PathRejection) -> Self {
        Self::from(RequestError::InvalidId(
            "the path could not be decoded.".to_owned(),
        ))
        .with_detailed_information(value.body_text())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}
