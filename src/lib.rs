//! # wxa-identity
//!
//! Server-side client for a mini-program platform's identity API. It
//! exchanges login codes for open identifiers and session keys, obtains
//! client-credential access tokens, and uses session-key signatures to fetch
//! a user's phone number and encrypted key material.
//!
//! Every operation is a single request. Token caching, retries and profile
//! decryption are left to the caller.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{Config, WechatConfig};
pub use models::identity::{AccessToken, EncryptedProfile, KeyInfo, OpenIdSession, PayloadBase, PhoneInfo};
pub use services::{identity_client::IdentityClient, signer::Signer};

// Re-export errors
pub use errors::{BadRequestCause, ErrorKind, IdentityError, IdentityResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}

/// Get the library name
pub fn name() -> &'static str {
    NAME
}
