use crate::Error;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// An API key under test.
///
/// The key is passed through verbatim; no format validation is performed.
#[derive(
    Clone, Debug, Default, Deserialize, Display, Eq, From, FromStr, Hash, Into, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct ApiKey(pub String);

impl ApiKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the key is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> ApiKey {
        ApiKey(key.to_owned())
    }
}

/// How the request payload is laid out on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BodyEncoding {
    /// The text `{'url': '<url>','key': '<key>'}`, single-quoted and unescaped, sent as a JSON
    /// string literal with HTML-sensitive characters escaped. This is byte-for-byte what
    /// deployed scanners have always sent.
    #[default]
    Legacy,
    /// The payload object is serialized to JSON, and that text is serialized again as a JSON
    /// string literal.
    DoubleEncoded,
    /// The payload object is sent as a single JSON object.
    Object,
}

/// The JSON body sent to the testing endpoint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payload<'a> {
    #[serde(borrow)]
    url: Cow<'a, str>,
    #[serde(borrow)]
    key: Cow<'a, str>,
}

impl<'a> Payload<'a> {
    /// Describes a request for `url` using `key`.
    #[must_use]
    pub fn new(url: &'a str, key: &'a str) -> Payload<'a> {
        Payload {
            url: Cow::Borrowed(url),
            key: Cow::Borrowed(key),
        }
    }

    /// The target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The API key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes the payload into a request body.
    pub fn encode(&self, encoding: BodyEncoding) -> Result<String, Error> {
        let body = match encoding {
            BodyEncoding::Legacy => {
                let text = format!("{{'url': '{}','key': '{}'}}", self.url, self.key);
                escape_html(&serde_json::to_string(&text).map_err(Error::Encode)?)
            }
            BodyEncoding::DoubleEncoded => {
                let object = serde_json::to_string(self).map_err(Error::Encode)?;
                serde_json::to_string(&object).map_err(Error::Encode)?
            }
            BodyEncoding::Object => serde_json::to_string(self).map_err(Error::Encode)?,
        };
        tracing::debug!(?encoding, %body);
        Ok(body)
    }
}

/// Escapes `<`, `>`, `&`, U+2028 and U+2029 inside serialized JSON, the way the legacy
/// scanner's encoder did. The output is still valid JSON for the same value.
fn escape_html(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c => escaped.push(c),
        }
    }
    escaped
}
