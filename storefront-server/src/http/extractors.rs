//! Custom Axum extractors

use std::marker::PhantomData;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Extract an integer row id from the path. Only plain digits are accepted,
/// so `+5` and `-1` are rejected like any other non-id.
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::MalformedBody {
                status: StatusCode::BAD_REQUEST,
                message: e.body_text(),
            })?;

        parse_id(&raw).map(Self).ok_or_else(|| ApiError::MalformedBody {
            status: StatusCode::BAD_REQUEST,
            message: format!("id must be an integer, got '{}'", raw),
        })
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// JSON body whose rejections render as [`ApiError`]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_error(rejection)),
        }
    }
}

/// JSON body read now but decoded later with [`DeferredJson::parse`], so a
/// handler can answer 404 for a missing row before judging the body.
pub struct DeferredJson<T> {
    bytes: Bytes,
    json_content_type: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DeferredJson<T> {
    /// Decode the body with the same statuses as [`JsonBody`]:
    /// 415 without a JSON content type, 400 for bad syntax, 422 for bad data.
    pub fn parse(self) -> Result<T, ApiError> {
        if !self.json_content_type {
            return Err(ApiError::MalformedBody {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "Expected request with `Content-Type: application/json`".to_string(),
            });
        }
        Json::<T>::from_bytes(&self.bytes)
            .map(|Json(value)| value)
            .map_err(body_error)
    }
}

impl<S, T> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content_type = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self {
            bytes,
            json_content_type,
            _marker: PhantomData,
        })
    }
}

fn body_error(rejection: JsonRejection) -> ApiError {
    ApiError::MalformedBody {
        status: rejection.status(),
        message: rejection.body_text(),
    }
}

/// `application/json` or any `application/*+json`, parameters ignored
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn ids_are_plain_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("+5"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("1.0"), None);
        assert_eq!(parse_id("99999999999"), None);
    }

    #[test]
    fn json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/merge-patch+json"),
        );
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }
}
