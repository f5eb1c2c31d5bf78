//! # IIT Delhi Proxy Login Library
//!
//! This library speaks the proxy gateway's form-based session protocol:
//! fetching the ephemeral session token embedded in the login page,
//! submitting login/logout/refresh forms with it, and classifying the
//! gateway's free-text HTML responses into outcomes.

pub mod category;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logger;
pub mod refresher;
pub mod session;

// Re-export commonly used items
pub use category::{envvar_snippet, gateway_url, proxy_host};
pub use config::Config;
pub use credentials::Credentials;
pub use error::SessionError;
pub use logger::init_logger;
pub use refresher::CancellationToken;
pub use session::{HttpGateway, Outcome, ProxySession};
