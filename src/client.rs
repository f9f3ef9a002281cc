use crate::{BodyEncoding, Error, Payload};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use std::borrow::Cow;

/// User agent sent with every request. Deployed scanners have always identified this way.
pub const USER_AGENT: &str = "FireBase Scanner v1.0.0";

const DEFAULT_BASE_URL: &str = "https://searchconsole.googleapis.com/v1/";
const MOBILE_FRIENDLY_TEST: &str = "urlTestingTools/mobileFriendlyTest:run";

/// HTTP client for the mobile-friendliness testing endpoint.
///
/// Server certificates are not verified, so the client also works against self-signed test
/// endpoints and through intercepting proxies. No timeout is configured.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) base_url: Cow<'static, str>,
    pub(crate) client: reqwest::Client,
}

impl Client {
    /// Creates a new `Client` with the default base URL,
    /// `https://searchconsole.googleapis.com/v1/`. Use [`Client::with_base_url`] to change the
    /// base URL.
    pub fn new() -> Result<Client, Error> {
        Ok(Client {
            base_url: Cow::Borrowed(DEFAULT_BASE_URL),
            client: reqwest::Client::builder()
                .danger_accept_invalid_certs(true)
                .user_agent(USER_AGENT)
                .build()?,
        })
    }

    /// Creates a new `Client` with a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, mut base_url: String) -> Client {
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = Cow::Owned(base_url);
        self
    }

    /// Returns the address a key is tested against. The key is appended without URL-encoding.
    #[must_use]
    pub fn endpoint(&self, api_key: &str) -> String {
        format!("{}{}?key={}", self.base_url, MOBILE_FRIENDLY_TEST, api_key)
    }

    /// Sends `payload` to the testing endpoint and returns the raw response body.
    ///
    /// The body is returned whatever the HTTP status; the service reports failures inside it.
    /// Only transport failures produce an error.
    #[tracing::instrument(skip(self, payload), fields(url = payload.url()))]
    pub async fn issue_request(
        &self,
        payload: &Payload<'_>,
        encoding: BodyEncoding,
    ) -> Result<Bytes, Error> {
        let body = payload.encode(encoding)?;

        let response = self
            .request(Method::POST, &self.endpoint(payload.key()))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();

        let bytes = response.bytes().await?;
        tracing::info!(%status, len = bytes.len(), "response received");
        Ok(bytes)
    }

    #[inline]
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::info!(%method, path = MOBILE_FRIENDLY_TEST, "Client::request");
        self.client.request(method, url)
    }
}
