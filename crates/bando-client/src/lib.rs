#![forbid(unsafe_code)]

//! HTTP client for the disciplinare-analysis backend.
//!
//! The backend does all the heavy lifting (PDF parsing, criteria
//! extraction, similarity scoring); this crate only uploads documents and
//! fetches finished [`Analysis`](bando_model::Analysis) snapshots. Requests
//! carry a timeout and bounded retries with exponential backoff; every
//! attempt is logged with `tracing`.

pub mod client;
pub mod config;
pub mod error;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{ClientError, ClientResult};
