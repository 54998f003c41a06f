//! Service-account authentication.
//!
//! Loads the credential file once and exchanges a signed JWT assertion for an
//! OAuth2 access token, caching it until shortly before expiry.

mod credentials;
mod token;

pub use credentials::{load_service_account, parse_service_account, ServiceAccountKey};
pub use token::{AccessToken, TokenProvider};
