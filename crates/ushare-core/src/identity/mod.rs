//! Identity collaborator.
//!
//! Authentication is delegated to a remote GoTrue-compatible service
//! (`RemoteIdentity`). The resulting `AuthSession` is handed explicitly to the
//! services that act for the user; the CLI keeps it between invocations in a
//! `SessionFile`.

mod http;
mod remote;
mod session_file;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Account, AuthSession};

pub use remote::RemoteIdentity;
pub use session_file::SessionFile;

/// Sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Public handle, stored in the user's metadata as `username`.
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account is active and signed in.
    SignedIn(AuthSession),
    /// The service wants the email confirmed before the first sign-in.
    ConfirmationRequired(Account),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_out(&self, session: &AuthSession) -> Result<()>;

    /// The account behind `access_token`, or `None` if the token is no longer valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<Account>>;
}
