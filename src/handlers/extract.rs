use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, OriginalUri, Path, Request};
use axum::http::{request::Parts, Extensions, Uri};
use axum::Json;

use crate::handlers::error::{ApiError, ResultExt};
use crate::wire::parse_id;

/// Full path of the current request, including any base path.
pub struct RequestPath(pub String);

/// A todo id taken from the `{id}` path segment.
pub struct TodoId(pub u64);

/// JSON body whose decoding failures are reported as malformed requests.
pub struct JsonBody<T>(pub T);

fn full_path(extensions: &Extensions, uri: &Uri) -> String {
    extensions
        .get::<OriginalUri>()
        .map(|original| original.0.path())
        .unwrap_or_else(|| uri.path())
        .to_string()
}

impl<S> FromRequestParts<S> for RequestPath
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestPath(full_path(&parts.extensions, &parts.uri)))
    }
}

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = full_path(&parts.extensions, &parts.uri);
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::malformed(rejection.body_text(), &path))?;

        parse_id(&raw).map(TodoId).at_path(&path)
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = full_path(req.extensions(), req.uri());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::malformed(rejection.body_text(), &path)),
        }
    }
}
