use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::StatusCode;

use super::error::{REJECTED_FALLBACK, SubmitError};
use crate::config::Config;
use crate::model::NewProduct;

/// Creates products on the storefront.
pub trait ProductApi: Send + Sync {
    /// Sends one create request. Any success status is `Ok`; the body is ignored.
    fn create_product(&self, product: NewProduct) -> BoxFuture<'static, Result<(), SubmitError>>;
}

/// [`ProductApi`] over HTTP: `POST {api_url}/api/products` with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpProductApi {
    /// Creates a client for the endpoint described by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint(),
            token: config.api_token.clone(),
        }
    }

    /// Returns the full endpoint URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProductApi for HttpProductApi {
    fn create_product(&self, product: NewProduct) -> BoxFuture<'static, Result<(), SubmitError>> {
        let mut request = self.client.post(&self.endpoint).json(&product);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let endpoint = self.endpoint.clone();

        async move {
            tracing::debug!(%endpoint, name = %product.name, "sending create request");
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            // An unreadable body is treated like one without an `error` field.
            let body = response.bytes().await.unwrap_or_else(|_| Bytes::new());
            Err(rejection(status, &body))
        }
        .boxed()
    }
}

/// Builds the error for a non-success response.
///
/// Uses the body's `error` string when it is present and non-empty, and
/// [`REJECTED_FALLBACK`] otherwise (missing field, wrong type, invalid JSON).
pub fn rejection(status: StatusCode, body: &[u8]) -> SubmitError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(serde_json::Value::as_str)
        .filter(|msg| !msg.trim().is_empty())
        .map_or_else(|| REJECTED_FALLBACK.to_string(), str::to_string);
    SubmitError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: StatusCode, body: &str) -> String {
        rejection(status, body.as_bytes()).to_string()
    }

    #[test]
    fn error_field_is_surfaced_verbatim() {
        assert_eq!(
            message(StatusCode::CONFLICT, r#"{"error":"Duplicate SKU"}"#),
            "Duplicate SKU"
        );
    }

    #[test]
    fn missing_error_field_falls_back() {
        assert_eq!(
            message(StatusCode::BAD_REQUEST, r#"{"detail":"nope"}"#),
            REJECTED_FALLBACK
        );
    }

    #[test]
    fn empty_error_field_falls_back() {
        assert_eq!(
            message(StatusCode::BAD_REQUEST, r#"{"error":""}"#),
            REJECTED_FALLBACK
        );
    }

    #[test]
    fn non_string_error_field_falls_back() {
        assert_eq!(
            message(StatusCode::BAD_REQUEST, r#"{"error":{"code":42}}"#),
            REJECTED_FALLBACK
        );
    }

    #[test]
    fn non_json_body_falls_back() {
        assert_eq!(
            message(StatusCode::INTERNAL_SERVER_ERROR, "<html>502</html>"),
            REJECTED_FALLBACK
        );
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(message(StatusCode::BAD_GATEWAY, ""), REJECTED_FALLBACK);
    }

    #[test]
    fn rejection_keeps_status() {
        match rejection(StatusCode::CONFLICT, b"{}") {
            SubmitError::Rejected { status, .. } => assert_eq!(status, StatusCode::CONFLICT),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_comes_from_config() {
        let config = Config {
            api_url: "https://shop.example.com".into(),
            api_token: Some("secret".into()),
        };
        let api = HttpProductApi::new(&config);
        assert_eq!(api.endpoint(), "https://shop.example.com/api/products");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let config = Config {
            api_url: format!("http://{addr}"),
            api_token: None,
        };
        let api = HttpProductApi::new(&config);
        let err = api.create_product(sample_product()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert!(!err.user_message().is_empty());
    }

    fn sample_product() -> NewProduct {
        use crate::model::{Category, RentalRates};
        NewProduct {
            brand: "Ford".into(),
            name: "Transit".into(),
            price: 35000.0,
            description: "Cargo van".into(),
            image: crate::model::PLACEHOLDER_IMAGE_URL.into(),
            category: Category::Van,
            is_rentable: false,
            rental_price: RentalRates {
                hourly: 0.0,
                daily: 0.0,
            },
        }
    }
}
