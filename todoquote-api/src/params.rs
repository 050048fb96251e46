/// Request field extraction and validation
///
/// Mobile clients send fields either as a JSON object or as form data, and
/// some put them in the query string. [`RequestParams`] merges all of them
/// into one map so handlers can validate by name:
///
/// ```no_run
/// use todoquote_api::{error::ApiResult, params::RequestParams};
///
/// async fn handler(params: RequestParams) -> ApiResult<()> {
///     let [email, password] = params.require(["email", "password"])?;
///     todoquote_api::params::require_valid_email(&email)?;
///     # let _ = password;
///     Ok(())
/// }
/// ```

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header, request::Parts},
    Form,
};
use validator::ValidateEmail;

use crate::error::ApiError;

/// Fields of one request, body values override query values
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    fields: HashMap<String, String>,
}

impl RequestParams {
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Raw value of a field, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the named values in order.
    ///
    /// A field that is absent or only whitespace counts as missing. All
    /// missing names are reported at once, in the order they were asked for.
    pub fn require<const N: usize>(&self, names: [&str; N]) -> Result<[String; N], ApiError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| self.get(name).map_or(true, |value| value.trim().is_empty()))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        Ok(names.map(|name| self.get(name).unwrap_or_default().to_string()))
    }

    /// Optional boolean flag, `default` when absent or blank
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        let Some(value) = self.get(name).map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(default);
        };

        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ApiError::BadRequest(format!(
                "Field {} must be a boolean",
                name
            ))),
        }
    }

    fn merge_json(&mut self, body: &[u8]) -> Result<(), ApiError> {
        let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| {
            ApiError::BadRequest("Request body must be a JSON object or form data".to_string())
        })?;

        let serde_json::Value::Object(map) = value else {
            return Err(ApiError::BadRequest(
                "Request body must be a JSON object or form data".to_string(),
            ));
        };

        for (key, value) in map {
            let value = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            self.fields.insert(key, value);
        }

        Ok(())
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = match Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
            Ok(Query(query)) => Self::from_fields(query),
            Err(_) => {
                return Err(ApiError::BadRequest(
                    "Query string is malformed".to_string(),
                ))
            }
        };

        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("Form body is malformed: {}", e)))?;
            params.fields.extend(form);
            return Ok(params);
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {}", e)))?;

        if !body.iter().all(u8::is_ascii_whitespace) {
            params.merge_json(&body)?;
        }

        Ok(params)
    }
}

/// Rejects values that are not a syntactically valid email address
pub fn require_valid_email(value: &str) -> Result<(), ApiError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Email is not valid".to_string()))
    }
}

/// Numeric id taken from the single path parameter of a route
///
/// Anything that is not an integer cannot name an existing row, so it is
/// reported as not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found())?;

        Ok(ResourceId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest};

    async fn extract(request: HttpRequest<Body>) -> Result<RequestParams, ApiError> {
        RequestParams::from_request(request, &()).await
    }

    fn params(pairs: &[(&str, &str)]) -> RequestParams {
        RequestParams::from_fields(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_json_body_scalars_are_stringified() {
        let request = HttpRequest::builder()
            .method("PUT")
            .uri("/tasks/1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"task":"Buy milk","status":1,"done":true,"note":null}"#))
            .unwrap();

        let params = extract(request).await.unwrap();

        assert_eq!(params.get("task"), Some("Buy milk"));
        assert_eq!(params.get("status"), Some("1"));
        assert_eq!(params.get("done"), Some("true"));
        assert_eq!(params.get("note"), None);
    }

    #[tokio::test]
    async fn test_form_body_is_read() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("email=a%40x.com&password=p"))
            .unwrap();

        let params = extract(request).await.unwrap();

        assert_eq!(params.get("email"), Some("a@x.com"));
        assert_eq!(params.get("password"), Some("p"));
    }

    #[tokio::test]
    async fn test_body_overrides_query() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/tasks?task=from-query&extra=1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"task":"from-body"}"#))
            .unwrap();

        let params = extract(request).await.unwrap();

        assert_eq!(params.get("task"), Some("from-body"));
        assert_eq!(params.get("extra"), Some("1"));
    }

    #[tokio::test]
    async fn test_empty_body_is_allowed() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/tasks")
            .body(Body::empty())
            .unwrap();

        assert!(extract(request).await.unwrap().get("task").is_none());
    }

    #[tokio::test]
    async fn test_non_object_json_is_rejected() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/tasks")
            .header("content-type", "application/json")
            .body(Body::from("[1, 2]"))
            .unwrap();

        assert!(matches!(
            extract(request).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_require_reports_missing_and_blank_in_order() {
        let params = params(&[("email", "   "), ("name", "A")]);

        match params.require(["name", "email", "password"]) {
            Err(ApiError::MissingFields(missing)) => {
                assert_eq!(missing, vec!["email", "password"]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_require_returns_values_in_order() {
        let params = params(&[("password", "p"), ("email", "a@x.com")]);

        let [email, password] = params.require(["email", "password"]).unwrap();
        assert_eq!(email, "a@x.com");
        assert_eq!(password, "p");
    }

    #[test]
    fn test_flag_parsing() {
        let params = params(&[("a", "1"), ("b", "off"), ("c", "TRUE"), ("d", "maybe")]);

        assert!(params.flag("a", false).unwrap());
        assert!(!params.flag("b", true).unwrap());
        assert!(params.flag("c", false).unwrap());
        assert!(params.flag("absent", true).unwrap());
        assert!(params.flag("d", false).is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(require_valid_email("a@x.com").is_ok());

        let err = require_valid_email("not-an-email").unwrap_err();
        assert_eq!(err.to_string(), "Email is not valid");
    }
}
