//! Authentication headers for Kibana
//!
//! Kibana API keys go in `Authorization: ApiKey <key>`. Every write also
//! needs the `kbn-xsrf` header, so it is set on all requests.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::core::{BridgeError, BridgeResult};

/// Anti-forgery header Kibana requires on non-GET requests
pub const XSRF_HEADER: &str = "kbn-xsrf";

/// API-key credentials for a Kibana deployment
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: String,
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Value for the `Authorization` header
    fn authorization(&self) -> String {
        format!("ApiKey {}", self.api_key)
    }

    /// Default headers sent with every request
    ///
    /// The authorization value is marked sensitive so it is left out of
    /// reqwest's debug output.
    pub fn headers(&self) -> BridgeResult<HeaderMap> {
        let mut auth = HeaderValue::from_str(&self.authorization()).map_err(|_| {
            BridgeError::invalid_argument("API key contains characters not allowed in a header")
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(XSRF_HEADER, HeaderValue::from_static("true"));
        Ok(headers)
    }
}
