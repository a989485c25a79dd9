//! HTTP client module: request identification, token auth, and status handling.

mod client;

pub use client::{HttpClient, default_user_agent, normalize_token};
