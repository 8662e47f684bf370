use crate::errors::ServiceError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, Method, Uri},
    Form, Json,
};
use serde::de::DeserializeOwned;

const JSON_MIME: &str = "application/json";
const FORM_MIME: &str = "application/x-www-form-urlencoded";

/// Request body accepted either as JSON or as an url-encoded form.
///
/// The `Content-Type` header picks the decoder; anything else is rejected
/// with 415 before the body is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with(JSON_MIME) {
            let Json(payload) = Json::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        } else if content_type.starts_with(FORM_MIME) {
            let Form(payload) = Form::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            Err(ServiceError::UnsupportedMediaType(format!(
                "expected {} or {}",
                JSON_MIME, FORM_MIME
            )))
        }
    }
}

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ServiceError {
    ServiceError::NotFound(format!("no route for {}", uri.path()))
}

/// Fallback for known paths hit with a method they do not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> ServiceError {
    ServiceError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}
