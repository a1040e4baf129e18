//! Authentication module
//!
//! Supports: Bearer token, API key header, or no authentication.
//!
//! The `Authenticator` applies the configured credentials to every request
//! the HTTP client sends.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
