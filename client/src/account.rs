//! Staff account endpoints
//!
//! These are the only calls that mutate the session store as a side effect.

use crate::{
    api::ApiClient,
    error::AccountError,
    types::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest},
    validate,
};
use reqwest::Method;

impl ApiClient {
    /// Sign a staff member in
    ///
    /// On success the token and user record are stored, the account's
    /// endpoint (if the backend sent one) becomes the tenant endpoint, and the
    /// session is flushed.
    ///
    /// # Errors
    ///
    /// - [`AccountError::Invalid`]: malformed email or short password, nothing sent
    /// - [`AccountError::Api`]: the request failed
    /// - [`AccountError::MissingToken`]: the response carried no access token
    /// - [`AccountError::Session`]: the session could not be persisted
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AccountError> {
        validate::email(&request.email)?;
        validate::password(&request.password)?;

        let builder = self.request(Method::POST, "/auth/app/login").await.json(request);
        let response: LoginResponse = self.execute(builder).await?;

        let Some(token) = response.access_token() else {
            tracing::warn!("Login response carried no access token");
            return Err(AccountError::MissingToken);
        };

        let session = self.session();
        session.sign_in(token.to_string(), response.data.clone()).await;
        if let Some(endpoint) = response.endpoint() {
            session.set_endpoint(endpoint.to_string()).await;
        }
        session.flush().await?;

        tracing::info!("Signed in");
        Ok(response)
    }

    /// Sign out
    ///
    /// The remote call is best effort; the session and tenant are cleared and
    /// flushed whatever it returns.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Session`] only if the cleared session cannot be persisted.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AccountError> {
        let builder = self.request(Method::POST, "/auth/logout").await;
        if let Err(error) = self.execute::<serde_json::Value>(builder).await {
            tracing::debug!(%error, "Ignoring logout failure");
        }

        self.session().clear_all().await;
        self.session().flush().await?;

        tracing::info!("Signed out");
        Ok(())
    }

    /// Create a staff account
    ///
    /// # Errors
    ///
    /// - [`AccountError::Invalid`]: a field failed its local check, nothing sent
    /// - [`AccountError::Api`]: the backend refused or could not be reached
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AccountResponse, AccountError> {
        validate::email(&request.email)?;
        validate::password(&request.password)?;
        validate::phone(&request.phone_number)?;

        let builder = self
            .request(Method::POST, "/auth/app/register")
            .await
            .json(request);

        Ok(self.execute(builder).await?)
    }

    /// Delete the signed-in account and forget the session
    ///
    /// # Errors
    ///
    /// - [`AccountError::Api`]: the backend refused; the session is kept
    /// - [`AccountError::Session`]: the cleared session could not be persisted
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<AccountResponse, AccountError> {
        let builder = self.request(Method::DELETE, "/users/app/me").await;
        let response: AccountResponse = self.execute(builder).await?;

        self.session().clear_session().await;
        self.session().flush().await?;

        tracing::info!("Account deleted");
        Ok(response)
    }
}
