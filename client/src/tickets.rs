//! Ticket lookup, check-in confirmation and history endpoints

use crate::{
    api::ApiClient,
    error::ApiError,
    types::{CheckinLogPage, ConfirmCheckinRequest, ConfirmCheckinResponse, Ticket},
};
use reqwest::Method;

const CHECKIN_PATH: &str = "/admin/tickets/checkin";
const CHECKIN_LOGS_PATH: &str = "/admin/tickets/checkin/logs";

impl ApiClient {
    /// Look a ticket up by code
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// undecodable body.
    #[tracing::instrument(skip(self))]
    pub async fn lookup_ticket(&self, ticket_code: &str) -> Result<Ticket, ApiError> {
        let request = self
            .request(Method::GET, CHECKIN_PATH)
            .await
            .query(&[("ticketCode", ticket_code)]);

        self.execute(request).await
    }

    /// Admit a ticket
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend refuses or cannot be reached.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_checkin(
        &self,
        ticket_code: &str,
    ) -> Result<ConfirmCheckinResponse, ApiError> {
        let request = self
            .request(Method::POST, CHECKIN_PATH)
            .await
            .json(&ConfirmCheckinRequest {
                ticket_code: ticket_code.to_string(),
            });

        self.execute(request).await
    }

    /// Fetch one page of the check-in history
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    #[tracing::instrument(skip(self))]
    pub async fn checkin_logs(&self, limit: u32, offset: u64) -> Result<CheckinLogPage, ApiError> {
        let request = self
            .request(Method::GET, CHECKIN_LOGS_PATH)
            .await
            .query(&[("limit", limit.to_string()), ("offset", offset.to_string())]);

        self.execute(request).await
    }
}
