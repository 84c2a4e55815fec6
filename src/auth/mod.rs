//! Authentication module
//!
//! Supports: static API key, username/password exchange
//!
//! The `Authenticator` owns the bearer token: it acquires it, caches it, and
//! re-authenticates when an exchanged token's `exp` claim has passed.

mod authenticator;
mod token;
mod types;

pub use authenticator::{AuthTransport, Authenticator};
pub use token::{is_token_expired, token_expiry, TokenClaims};
pub use types::{AuthenticationResponse, CachedToken, Credentials, TokenSource};
