//! Persisted session and tenant state
//!
//! The session (token and user record) and the tenant config (resolved
//! endpoint and club branding) live together in one JSON file so they are
//! restored as a pair. A token is only valid against the endpoint that
//! issued it.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolved tenant endpoint and branding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantConfig {
    /// Tenant API base URL
    pub endpoint: Option<String>,
    /// Club display name
    pub club_name: Option<String>,
    /// Club logo URL
    pub logo: Option<String>,
}

/// Everything that survives a restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
    /// Bearer token; present exactly when signed in
    pub token: Option<String>,
    /// Opaque user record returned by login
    pub user: Option<serde_json::Value>,
    /// Resolved tenant
    pub tenant: TenantConfig,
}

impl SessionSnapshot {
    /// Whether a staff member is signed in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Shared, injectable session store
///
/// Mutations only touch memory; call [`SessionStore::flush`] to persist.
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: Arc<RwLock<SessionSnapshot>>,
}

impl SessionStore {
    /// Store that never touches disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_snapshot(None, SessionSnapshot::default())
    }

    fn with_snapshot(path: Option<PathBuf>, snapshot: SessionSnapshot) -> Self {
        Self {
            path,
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Restore the store from `path`
    ///
    /// A missing file yields an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the file exists but cannot be read or parsed.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No session file, starting empty");
                SessionSnapshot::default()
            },
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            authenticated = snapshot.is_authenticated(),
            "Session loaded"
        );
        Ok(Self::with_snapshot(Some(path), snapshot))
    }

    /// File this store persists to, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    /// Current bearer token
    pub async fn token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .token
            .clone()
            .filter(|token| !token.is_empty())
    }

    /// Resolved tenant endpoint
    pub async fn endpoint(&self) -> Option<String> {
        self.state.read().await.tenant.endpoint.clone()
    }

    /// Whether a staff member is signed in
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Record a successful login
    pub async fn sign_in(&self, token: String, user: Option<serde_json::Value>) {
        let mut state = self.state.write().await;
        state.token = Some(token);
        state.user = user;
    }

    /// Point requests at a tenant endpoint
    pub async fn set_endpoint(&self, endpoint: String) {
        self.state.write().await.tenant.endpoint = Some(endpoint);
    }

    /// Replace the club branding
    pub async fn set_club_info(&self, club_name: Option<String>, logo: Option<String>) {
        let mut state = self.state.write().await;
        state.tenant.club_name = club_name;
        state.tenant.logo = logo;
    }

    /// Forget the token and user; the tenant stays
    pub async fn clear_session(&self) {
        let mut state = self.state.write().await;
        state.token = None;
        state.user = None;
    }

    /// Forget the session and the tenant
    pub async fn clear_all(&self) {
        *self.state.write().await = SessionSnapshot::default();
    }

    /// Write the current state to disk
    ///
    /// Writes a sibling temp file and renames it over the target so a crash
    /// never leaves a half-written session. No-op for in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if serialization or any file operation fails.
    pub async fn flush(&self) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&*self.state.read().await)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!(path = %path.display(), "Session flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(dir.path().join("session.json")).await.unwrap();

        assert_eq!(store.snapshot().await, SessionSnapshot::default());
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn flush_then_load_restores_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::load(&path).await.unwrap();
        store.set_endpoint("https://club.example".into()).await;
        store
            .set_club_info(Some("HAGL".into()), Some("https://club.example/logo.png".into()))
            .await;
        store.sign_in("tok".into(), Some(json!({ "email": "staff@club.example" }))).await;
        store.flush().await.unwrap();

        let restored = SessionStore::load(&path).await.unwrap();
        assert_eq!(restored.snapshot().await, store.snapshot().await);
        assert_eq!(restored.token().await.as_deref(), Some("tok"));
        assert_eq!(restored.endpoint().await.as_deref(), Some("https://club.example"));
    }

    #[tokio::test]
    async fn clear_session_keeps_tenant() {
        let store = SessionStore::in_memory();
        store.set_endpoint("https://club.example".into()).await;
        store.sign_in("tok".into(), None).await;

        store.clear_session().await;

        assert!(!store.is_authenticated().await);
        assert_eq!(store.endpoint().await.as_deref(), Some("https://club.example"));
    }

    #[tokio::test]
    async fn clear_all_drops_tenant_and_branding() {
        let store = SessionStore::in_memory();
        store.set_endpoint("https://club.example".into()).await;
        store.set_club_info(Some("HAGL".into()), None).await;
        store.sign_in("tok".into(), None).await;

        store.clear_all().await;

        assert_eq!(store.snapshot().await, SessionSnapshot::default());
    }

    #[tokio::test]
    async fn empty_token_is_not_authenticated() {
        let store = SessionStore::in_memory();
        store.sign_in(String::new(), None).await;
        assert!(!store.is_authenticated().await);
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = SessionStore::load(&path).await;
        assert!(matches!(result, Err(SessionError::Format(_))));
    }

    #[tokio::test]
    async fn in_memory_flush_is_noop() {
        let store = SessionStore::in_memory();
        store.sign_in("tok".into(), None).await;
        store.flush().await.unwrap();
        assert!(store.path().is_none());
    }
}
