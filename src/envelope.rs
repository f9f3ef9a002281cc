use crate::Error;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

/// Matches from the start of a message through its first period.
static FIRST_SENTENCE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^.+?\.").unwrap());

/// The JSON document the testing service returns when a call fails.
///
/// Every field is optional. Absent and `null` fields decode to their zero value.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Envelope {
    /// The error description.
    #[serde(default, deserialize_with = "nullable")]
    pub error: ApiError,
}

/// The `error` object of an [`Envelope`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ApiError {
    /// HTTP-style error code.
    #[serde(default, deserialize_with = "nullable")]
    pub code: i64,
    /// Free-text description.
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    /// Machine-readable status token, such as `PERMISSION_DENIED`.
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    /// Typed detail records. Decoded but never reported.
    #[serde(default, deserialize_with = "nullable")]
    pub details: Vec<Detail>,
}

/// One entry of [`ApiError::details`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Detail {
    /// The `@type` URL naming the detail kind.
    #[serde(default, rename = "@type", deserialize_with = "nullable")]
    pub kind: String,
    /// Related documentation links.
    #[serde(default, deserialize_with = "nullable")]
    pub links: Vec<Link>,
}

/// A documentation link attached to a [`Detail`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Link {
    /// Link text.
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// Link target.
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

/// The fields of a response worth reporting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Interpretation {
    /// The envelope's error code, or 0.
    pub code: i64,
    /// The envelope's status token, or empty.
    pub status: String,
    /// The message truncated after its first sentence, or empty if it has none.
    pub short_message: String,
}

impl Envelope {
    /// Decodes a raw response body.
    pub fn decode(raw: &[u8]) -> Result<Envelope, Error> {
        serde_json::from_slice(raw).map_err(Error::Decode)
    }
}

/// Decodes a raw response body and pulls out the code, status, and first sentence of the
/// message.
#[tracing::instrument(skip_all, fields(len = raw.len()))]
pub fn interpret(raw: &[u8]) -> Result<Interpretation, Error> {
    let Envelope { error } = Envelope::decode(raw)?;
    let interpretation = Interpretation {
        code: error.code,
        short_message: short_message(&error.message).to_owned(),
        status: error.status,
    };
    tracing::debug!(?interpretation);
    Ok(interpretation)
}

/// Returns `message` up to and including its first period.
///
/// At least one character must precede the period, and the match does not cross a line break.
/// If there is no such period the result is empty.
#[must_use]
pub fn short_message(message: &str) -> &str {
    FIRST_SENTENCE.find(message).map_or("", |m| m.as_str())
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
