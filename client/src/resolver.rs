//! Endpoint resolver client
//!
//! Maps a club domain and passcode to the tenant's API base URL and
//! branding. The resolver is a separate, unauthenticated service.

use crate::{
    config::ClientConfig,
    error::ResolverError,
    validate,
    session::SessionStore,
    types::{
        DomainDeletion, DomainRegistration, ResolveRequest, ResolveResponse, Resolution,
        ResolverMessage,
    },
};
use reqwest::{Client, Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for the endpoint resolution service
#[derive(Debug, Clone)]
pub struct ResolverClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ResolverClient {
    /// Create a resolver client writing into `session`
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ResolverError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ResolverError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.resolver_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Resolve a domain and store the tenant
    ///
    /// On failure nothing is stored.
    ///
    /// # Errors
    ///
    /// - [`ResolverError::MissingFields`]: blank domain or passcode, nothing sent
    /// - [`ResolverError::Invalid`]: passcode shorter than six characters, nothing sent
    /// - [`ResolverError::Rejected`]: the resolver's `error`, then `message`,
    ///   then "no valid endpoint found"
    /// - [`ResolverError::Transport`]: the resolver could not be reached
    /// - [`ResolverError::Session`]: the tenant could not be persisted
    #[tracing::instrument(skip(self, passcode))]
    pub async fn resolve(&self, domain: &str, passcode: &str) -> Result<Resolution, ResolverError> {
        let (domain, passcode) = (domain.trim(), passcode.trim());
        if domain.is_empty() || passcode.is_empty() {
            return Err(ResolverError::MissingFields);
        }
        validate::passcode(passcode)?;

        let request = ResolveRequest {
            domain: domain.to_string(),
            passcode: passcode.to_string(),
        };
        let (ok, body): (bool, ResolveResponse) = self.call(Method::POST, "/", &request).await?;

        let endpoint = body.endpoint.filter(|e| !e.trim().is_empty());
        let Some(endpoint) = endpoint.filter(|_| ok) else {
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| "no valid endpoint found".to_string());
            tracing::warn!(%message, "Domain resolution refused");
            return Err(ResolverError::Rejected(message));
        };

        self.session.set_endpoint(endpoint.clone()).await;
        self.session
            .set_club_info(body.club_name.clone(), body.logo.clone())
            .await;
        self.session.flush().await?;

        tracing::info!(%endpoint, "Domain resolved");
        Ok(Resolution {
            endpoint,
            club_name: body.club_name,
            logo: body.logo,
        })
    }

    /// Register a new club domain
    ///
    /// # Errors
    ///
    /// - [`ResolverError::MissingFields`]: blank club name or domain, nothing sent
    /// - [`ResolverError::Invalid`]: passcode not six or more digits, nothing sent
    /// - [`ResolverError::Rejected`]: the resolver's `message` or "registration failed"
    /// - [`ResolverError::Transport`]: the resolver could not be reached
    #[tracing::instrument(skip(self, registration), fields(domain = %registration.domain))]
    pub async fn register_domain(
        &self,
        registration: &DomainRegistration,
    ) -> Result<Option<String>, ResolverError> {
        if registration.club_name.trim().is_empty() || registration.domain.trim().is_empty() {
            return Err(ResolverError::MissingFields);
        }
        validate::new_passcode(&registration.passcode)?;

        let (ok, body): (bool, ResolverMessage) =
            self.call(Method::POST, "/register", registration).await?;

        if ok {
            Ok(body.message)
        } else {
            Err(ResolverError::Rejected(
                body.message.unwrap_or_else(|| "registration failed".to_string()),
            ))
        }
    }

    /// Remove a club domain and sign the staff member out
    ///
    /// # Errors
    ///
    /// - [`ResolverError::Rejected`]: the resolver's `message` or "could not delete domain"
    /// - [`ResolverError::Transport`]: the resolver could not be reached
    /// - [`ResolverError::Session`]: the cleared session could not be persisted
    #[tracing::instrument(skip(self))]
    pub async fn delete_domain(&self, domain: &str) -> Result<Option<String>, ResolverError> {
        let request = DomainDeletion {
            domain: domain.trim().to_string(),
        };
        let (ok, body): (bool, ResolverMessage) =
            self.call(Method::DELETE, "/delete", &request).await?;

        if !ok {
            return Err(ResolverError::Rejected(
                body.message
                    .unwrap_or_else(|| "could not delete domain".to_string()),
            ));
        }

        self.session.clear_session().await;
        self.session.flush().await?;
        Ok(body.message)
    }

    /// Send a JSON body and decode the response whatever the status
    ///
    /// An undecodable body reads as an empty response so the caller's
    /// fallback message applies.
    async fn call<B, T>(&self, method: Method, path: &str, body: &B) -> Result<(bool, T), ResolverError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let response = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Resolver unreachable");
                ResolverError::Transport(e.to_string())
            })?;

        let ok = response.status().is_success();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResolverError::Transport(e.to_string()))?;
        let parsed = serde_json::from_slice(&bytes).unwrap_or_default();

        Ok((ok, parsed))
    }
}
