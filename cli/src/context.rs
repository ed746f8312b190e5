//! Per-invocation setup shared by every command

use checkin_client::{ApiClient, ApiError, ClientConfig, ResolverClient, ResolverError, SessionError, SessionStore};
use checkin_flow::FlowConfig;
use checkin_runtime::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Failures owned by the terminal itself
#[derive(Debug, Error)]
pub enum CliError {
    /// A command needs a signed-in staff member
    #[error("not signed in; run `checkin login` first")]
    NotSignedIn,

    /// The backend refused; carries the operator-facing message
    #[error("{0}")]
    Refused(String),

    /// The backend could not be set up or reached
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A destructive command was not confirmed
    #[error("pass --yes to {0}")]
    Unconfirmed(&'static str),

    /// The flow did not settle
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored session could not be read
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Terminal input failed
    #[error("terminal input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Loaded configuration plus the shared session
pub struct Context {
    pub config: ClientConfig,
    pub flow: FlowConfig,
    pub session: SessionStore,
}

impl Context {
    /// Load configuration and restore the session file
    pub async fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env();
        let flow = FlowConfig::from_env();
        let session = SessionStore::load(&config.session_file).await?;

        tracing::debug!(
            session_file = %config.session_file.display(),
            time_zone = ?flow.time_zone,
            "Configuration loaded"
        );

        Ok(Self {
            config,
            flow,
            session,
        })
    }

    pub fn api(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.config, self.session.clone())
    }

    pub fn resolver(&self) -> Result<ResolverClient, ResolverError> {
        ResolverClient::new(&self.config, self.session.clone())
    }

    pub async fn require_sign_in(&self) -> Result<(), CliError> {
        if self.session.is_authenticated().await {
            Ok(())
        } else {
            Err(CliError::NotSignedIn)
        }
    }

    /// How long to wait for a flow step to settle
    ///
    /// One request plus slack for the signal effect.
    pub fn settle_timeout(&self) -> Duration {
        self.config.request_timeout + Duration::from_secs(2)
    }
}
