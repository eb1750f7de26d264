//! Data provider for participant records.
//!
//! `ApiClient` fetches the dataset over HTTP; `ParticipantProvider` wraps
//! either the client or a local JSON file and strips ignored columns.

pub mod client;
pub mod error;
pub mod provider;

pub use client::{parse_participants, ApiClient};
pub use error::ApiError;
pub use provider::{fetch_error_message, DataSource, ParticipantProvider};
