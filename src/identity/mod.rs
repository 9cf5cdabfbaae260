//! Identity resolution with offline fallback

pub mod http;
pub mod mock;
pub mod provider;
pub mod session;

pub use http::HttpIdentityProvider;
pub use provider::{IdentityError, IdentityProvider};
pub use session::{IdentitySession, SubscriptionHandle};
