//! fbscan checks whether a cloud API key is restricted. It submits a URL to the Search Console
//! mobile-friendliness test with the key, then reports the error code and status the service
//! sends back. A key that is not refused can be used from anywhere.
//!
//! ```no_run
//! use fbscan::{interpret, BodyEncoding, Client, Payload};
//!
//! # async fn f() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new()?;
//!
//! // Submit a URL with the key under test
//! let payload = Payload::new("http://www.google.com", "AIza...");
//! let body = client.issue_request(&payload, BodyEncoding::default()).await?;
//!
//! // The service describes refusals in the response body
//! let result = interpret(&body)?;
//! println!("{} {} {}", result.code, result.status, result.short_message);
//! # Ok(())
//! # }
//! ```

#![deny(elided_lifetimes_in_paths)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::missing_errors_doc)]

mod client;
mod envelope;
mod error;
mod payload;
mod report;
mod scan;

pub use crate::client::{Client, USER_AGENT};
pub use crate::envelope::{
    interpret, short_message, ApiError, Detail, Envelope, Interpretation, Link,
};
pub use crate::error::Error;
pub use crate::payload::{ApiKey, BodyEncoding, Payload};
pub use crate::report::{format_timestamp, project_url, Presenter};
pub use crate::scan::{run, ScanConfig, DEFAULT_TARGET_URL};
