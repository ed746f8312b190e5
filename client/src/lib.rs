//! # Checkin Client
//!
//! Remote plumbing for the check-in client:
//!
//! - [`SessionStore`]: token, user and resolved tenant, persisted as JSON
//! - [`ApiClient`]: authenticated calls to the tenant's ticketing backend
//! - [`ResolverClient`]: club domain to tenant endpoint resolution
//! - [`ClientConfig`]: environment-driven configuration
//! - [`validate`]: local form checks run before any request
//!
//! ## Example
//!
//! ```ignore
//! use checkin_client::{ApiClient, ClientConfig, ResolverClient, SessionStore};
//!
//! let config = ClientConfig::from_env();
//! let session = SessionStore::load(&config.session_file).await?;
//!
//! ResolverClient::new(&config, session.clone())?
//!     .resolve("hagl", "123456")
//!     .await?;
//!
//! let api = ApiClient::new(&config, session)?;
//! let ticket = api.lookup_ticket("KHC-0001").await?;
//! ```

pub mod account;
pub mod api;
pub mod config;
pub mod error;
pub mod resolver;
pub mod session;
pub mod tickets;
pub mod types;
pub mod validate;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{AccountError, ApiError, ResolverError, SessionError};
pub use resolver::ResolverClient;
pub use session::{SessionSnapshot, SessionStore, TenantConfig};
pub use types::*;
pub use validate::ValidationError;
