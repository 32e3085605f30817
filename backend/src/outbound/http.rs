//! Reqwest-backed adapters for the user directory and identity store.
//!
//! These adapters own transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain records. Availability
//! and error semantics belong to the remote services; every failure is
//! reduced to a message (and, when the remote supplies one, a cause code).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{
    IdentityStore, IdentityStoreError, UserDirectory, UserDirectoryError,
};
use crate::domain::{Uid, UserRecord};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body shape emitted by both remote services.
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Summarise a non-success response into a message and optional cause code.
fn summarize_failure(status: StatusCode, body: &[u8]) -> (String, Option<String>) {
    if let Ok(parsed) = serde_json::from_slice::<RemoteErrorBody>(body) {
        if let Some(message) = parsed.message {
            return (message, parsed.code);
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        (format!("remote service returned {status}"), None)
    } else {
        (format!("remote service returned {status}: {text}"), None)
    }
}

/// Document-store client reading the users collection over HTTP.
///
/// `GET {base}/users/{uid}` is expected to answer `200` with a JSON user
/// record, or `404` when no record exists.
pub struct HttpUserDirectory {
    client: Client,
    base: Url,
}

impl HttpUserDirectory {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn record_url(&self, uid: &Uid) -> Result<Url, UserDirectoryError> {
        self.base
            .join(&format!("users/{uid}"))
            .map_err(|err| UserDirectoryError::lookup(format!("invalid directory URL: {err}")))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_user(&self, uid: &Uid) -> Result<Option<UserRecord>, UserDirectoryError> {
        let url = self.record_url(uid)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| UserDirectoryError::connection(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| UserDirectoryError::connection(err.to_string()))?;
        if !status.is_success() {
            let (message, _) = summarize_failure(status, body.as_ref());
            return Err(UserDirectoryError::lookup(message));
        }

        let record: UserRecord = serde_json::from_slice(body.as_ref())
            .map_err(|err| UserDirectoryError::lookup(format!("malformed user record: {err}")))?;
        Ok(Some(record))
    }
}

/// Identity-management client deleting accounts over HTTP.
///
/// `DELETE {base}/accounts/{uid}` is expected to answer with a success
/// status; anything else is reported as a rejected deletion.
pub struct HttpIdentityStore {
    client: Client,
    base: Url,
}

impl HttpIdentityStore {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn account_url(&self, uid: &Uid) -> Result<Url, IdentityStoreError> {
        self.base
            .join(&format!("accounts/{uid}"))
            .map_err(|err| IdentityStoreError::delete(format!("invalid identity URL: {err}")))
    }
}

#[async_trait]
impl IdentityStore for HttpIdentityStore {
    async fn delete_account(&self, uid: &Uid) -> Result<(), IdentityStoreError> {
        let url = self.account_url(uid)?;
        let response = self
            .client
            .delete(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| IdentityStoreError::connection(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityStoreError::connection(err.to_string()))?;
        let (message, cause) = summarize_failure(status, body.as_ref());
        Err(match cause {
            Some(cause) => IdentityStoreError::delete_with_cause(message, cause),
            None => IdentityStoreError::delete(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn structured_error_bodies_yield_message_and_cause() {
        let body = br#"{"message":"no user record for usr-9","code":"user-not-found"}"#;
        let (message, cause) = summarize_failure(StatusCode::NOT_FOUND, body);
        assert_eq!(message, "no user record for usr-9");
        assert_eq!(cause.as_deref(), Some("user-not-found"));
    }

    #[rstest]
    #[case::empty(b"".as_slice(), "remote service returned 500 Internal Server Error")]
    #[case::plain_text(
        b"boom".as_slice(),
        "remote service returned 500 Internal Server Error: boom"
    )]
    fn unstructured_error_bodies_fall_back_to_status_text(
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        let (message, cause) = summarize_failure(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(message, expected);
        assert_eq!(cause, None);
    }

    #[test]
    fn record_urls_nest_under_the_users_collection() {
        let base: Url = "http://directory.internal/api/".parse().expect("valid URL");
        let directory = HttpUserDirectory::new(base).expect("client builds");
        let uid = Uid::new("usr-9").expect("valid uid");
        let url = directory.record_url(&uid).expect("joinable URL");
        assert_eq!(url.as_str(), "http://directory.internal/api/users/usr-9");
    }

    #[test]
    fn account_urls_nest_under_the_accounts_collection() {
        let base: Url = "http://identity.internal/admin/".parse().expect("valid URL");
        let store = HttpIdentityStore::new(base).expect("client builds");
        let uid = Uid::new("usr-9").expect("valid uid");
        let url = store.account_url(&uid).expect("joinable URL");
        assert_eq!(url.as_str(), "http://identity.internal/admin/accounts/usr-9");
    }
}
