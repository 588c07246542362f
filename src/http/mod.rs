//! HTTP client module
//!
//! Fetches the raw inventory payload from the CMDB.
//!
//! One authenticated GET per inventory load. There are no retries and no
//! rate limiting: a failure surfaces immediately as a fetch error.

mod client;

pub use client::{HttpClient, HttpClientConfig};
