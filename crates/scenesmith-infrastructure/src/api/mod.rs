//! JSON API access.
//!
//! Every backend endpoint answers with an envelope `{ "ok": bool, ... }`.
//! [`ApiClient`] performs the HTTP exchange and maps transport and status
//! failures; [`ApiEnvelope`] unwraps the payload.

mod client;
mod envelope;

pub use client::ApiClient;
pub use envelope::{ApiEnvelope, parse_error_body};
