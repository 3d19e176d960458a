//! Sign-up / sign-in orchestration over the identity and profile collaborators.

use std::sync::Arc;

use crate::error::{remote, CoreResult, ValidationError};
use crate::identity::{IdentityProvider, SignUpOutcome, SignUpRequest};
use crate::model::{Account, AuthSession};
use crate::store::SocialGraph;

/// Keeps the public profile row in step with the identity service.
pub struct AccountService<I: ?Sized, G: ?Sized> {
    identity: Arc<I>,
    graph: Arc<G>,
}

impl<I, G> AccountService<I, G>
where
    I: IdentityProvider + ?Sized,
    G: SocialGraph + ?Sized,
{
    pub fn new(identity: Arc<I>, graph: Arc<G>) -> Self {
        Self { identity, graph }
    }

    /// Creates the account and its public profile. The handle is required.
    pub async fn sign_up(&self, email: &str, password: &str, handle: &str) -> CoreResult<SignUpOutcome> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ValidationError::MissingUsername.into());
        }
        let request = SignUpRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            handle: handle.to_string(),
        };
        let outcome = self
            .identity
            .sign_up(&request)
            .await
            .map_err(remote("sign up"))?;

        let account = match &outcome {
            SignUpOutcome::SignedIn(session) => &session.user,
            SignUpOutcome::ConfirmationRequired(account) => account,
        };
        self.graph
            .upsert_profile(&account.id, handle)
            .await
            .map_err(remote("create profile"))?;
        tracing::info!(user = %account.id, handle, "account created");
        Ok(outcome)
    }

    /// Signs in and makes sure the account has a public profile row.
    pub async fn sign_in(&self, email: &str, password: &str) -> CoreResult<AuthSession> {
        let session = self
            .identity
            .sign_in(email.trim(), password)
            .await
            .map_err(remote("sign in"))?;
        self.graph
            .upsert_profile(&session.user.id, &session.user.handle)
            .await
            .map_err(remote("sync profile"))?;
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    pub async fn sign_out(&self, session: &AuthSession) -> CoreResult<()> {
        self.identity
            .sign_out(session)
            .await
            .map_err(remote("sign out"))?;
        tracing::info!(user = %session.user.id, "signed out");
        Ok(())
    }

    /// The account behind `session`, or `None` once the token has expired.
    pub async fn current_user(&self, session: &AuthSession) -> CoreResult<Option<Account>> {
        self.identity
            .current_user(&session.access_token)
            .await
            .map_err(remote("fetch current user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::{db_for_tests, LinkStore, SocialGraph, SqliteStore};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-process identity double: accepts one password, issues fixed tokens.
    #[derive(Default)]
    struct FakeIdentity {
        confirm_first: bool,
        signed_out: Mutex<Vec<String>>,
    }

    fn account(handle: &str) -> Account {
        Account {
            id: format!("id-{handle}"),
            handle: handle.to_string(),
            email: format!("{handle}@example.com"),
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
            let user = account(&request.handle);
            if self.confirm_first {
                return Ok(SignUpOutcome::ConfirmationRequired(user));
            }
            Ok(SignUpOutcome::SignedIn(AuthSession {
                access_token: format!("token-{}", request.handle),
                user,
            }))
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
            anyhow::ensure!(password == "secret", "Invalid login credentials");
            let handle = email.split('@').next().unwrap_or_default();
            Ok(AuthSession {
                access_token: format!("token-{handle}"),
                user: account(handle),
            })
        }

        async fn sign_out(&self, session: &AuthSession) -> Result<()> {
            self.signed_out
                .lock()
                .unwrap()
                .push(session.access_token.clone());
            Ok(())
        }

        async fn current_user(&self, access_token: &str) -> Result<Option<Account>> {
            Ok(access_token.strip_prefix("token-").map(account))
        }
    }

    async fn service(identity: FakeIdentity) -> (AccountService<FakeIdentity, SqliteStore>, Arc<SqliteStore>) {
        let store = Arc::new(db_for_tests().await);
        (AccountService::new(Arc::new(identity), Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn sign_up_requires_handle() {
        let (svc, _) = service(FakeIdentity::default()).await;
        let err = svc.sign_up("a@example.com", "secret", "  ").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingUsername)
        ));
    }

    #[tokio::test]
    async fn sign_up_creates_profile() {
        let (svc, store) = service(FakeIdentity::default()).await;
        let outcome = svc.sign_up("alice@example.com", "secret", " alice ").await.unwrap();
        assert!(matches!(outcome, SignUpOutcome::SignedIn(_)));
        assert_eq!(
            store.find_by_handle("alice").await.unwrap().as_deref(),
            Some("id-alice")
        );
    }

    #[tokio::test]
    async fn sign_up_pending_confirmation_still_reserves_handle() {
        let identity = FakeIdentity {
            confirm_first: true,
            ..Default::default()
        };
        let (svc, store) = service(identity).await;
        let outcome = svc.sign_up("bob@example.com", "secret", "bob").await.unwrap();
        assert!(matches!(outcome, SignUpOutcome::ConfirmationRequired(_)));
        let hits = store.search_profiles("bob", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn sign_in_failure_is_remote_error() {
        let (svc, _) = service(FakeIdentity::default()).await;
        let err = svc.sign_in("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, CoreError::Remote(_)));
        assert!(err.to_string().contains("Invalid login credentials"));
    }

    #[tokio::test]
    async fn sign_in_current_user_sign_out() {
        let (svc, store) = service(FakeIdentity::default()).await;
        let session = svc.sign_in("carol@example.com", "secret").await.unwrap();
        assert_eq!(session.user.handle, "carol");
        assert_eq!(store.search_profiles("carol", 5).await.unwrap().len(), 1);

        let me = svc.current_user(&session).await.unwrap().unwrap();
        assert_eq!(me.id, "id-carol");

        svc.sign_out(&session).await.unwrap();
        assert_eq!(
            svc.identity.signed_out.lock().unwrap().as_slice(),
            ["token-carol".to_string()]
        );
    }
}
