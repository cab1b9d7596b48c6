//! API-key credentials for the inventory REST API.

use reqwest::header::{HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Applies `Authorization: ApiKey <user>:<key>` to outgoing requests.
///
/// Built once per run and reused for every call. Touches no other header.
#[derive(Clone)]
pub struct ApiKeyAuth {
    header: HeaderValue,
}

impl ApiKeyAuth {
    pub fn new(user: &str, key: &str) -> Result<Self, InvalidHeaderValue> {
        let mut header = HeaderValue::from_str(&format!("ApiKey {}:{}", user, key))?;
        header.set_sensitive(true);
        Ok(Self { header })
    }

    /// Attach the credential to a request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header.clone())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth").finish_non_exhaustive()
    }
}
