//! Integration test: account flows against a local auth server and an on-disk store.
//!
//! Signs up and in through `RemoteIdentity`, keeps the session in a
//! `SessionFile`, then adds links and follows a profile through the dashboard.

mod common;

use std::sync::Arc;

use tempfile::tempdir;
use ushare_core::account::AccountService;
use ushare_core::config::SubmitPolicy;
use ushare_core::dashboard::{public_profile, Dashboard};
use ushare_core::identity::{IdentityProvider, RemoteIdentity, SessionFile, SignUpOutcome};
use ushare_core::session::EditSession;
use ushare_core::store::{SocialGraph, SqliteStore};
use ushare_core::CoreError;

#[tokio::test]
async fn sign_up_add_links_and_follow() {
    let base = common::identity_server::start();
    let state = tempdir().unwrap();
    let store = Arc::new(SqliteStore::open_at(&state.path().join("ushare.db")).await.unwrap());
    let identity = Arc::new(RemoteIdentity::new(base, "anon-key"));
    let accounts = AccountService::new(identity.clone(), store.clone());

    let outcome = accounts
        .sign_up("alice@example.com", common::identity_server::PASSWORD, "alice")
        .await
        .unwrap();
    let alice = match outcome {
        SignUpOutcome::SignedIn(session) => session,
        other => panic!("expected an active session, got {other:?}"),
    };
    assert_eq!(alice.user.handle, "alice");
    assert_eq!(alice.access_token, "token-alice@example.com");

    let pending = accounts
        .sign_up("confirm-bob@example.com", common::identity_server::PASSWORD, "bob")
        .await
        .unwrap();
    assert!(matches!(pending, SignUpOutcome::ConfirmationRequired(ref a) if a.handle == "bob"));

    let sessions = SessionFile::at(state.path().join("session.json"));
    sessions.save(&alice).unwrap();
    let alice = sessions.load().unwrap().unwrap();

    let dash = Dashboard::new(store.clone(), alice.clone(), SubmitPolicy::Reject);
    let mut entry = EditSession::new();
    entry.select_template("linkedin").unwrap();
    entry.edit_handle("alice-b");
    dash.commit(entry.submit().unwrap()).await.unwrap();

    let mut entry = EditSession::new();
    entry.select_template("custom").unwrap();
    entry.edit_link("alice.dev/portfolio");
    let custom = dash.commit(entry.submit().unwrap()).await.unwrap().unwrap();
    assert_eq!(custom.link.url, "https://alice.dev/portfolio");
    assert_eq!(custom.link.username, "portfolio");

    let public = public_profile(store.as_ref(), "alice").await.unwrap();
    let urls: Vec<&str> = public.iter().map(|v| v.link.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://www.linkedin.com/in/alice-b", "https://alice.dev/portfolio"]
    );

    assert!(dash.follow("bob").await.unwrap());
    let friends = dash.friends().await.unwrap();
    assert_eq!(friends[0].handle, "bob");
    assert_eq!(dash.share_url("https://ushare.example"), "https://ushare.example/u/alice");

    let hits = store.search_profiles("AL", 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].handle, "alice");
}

#[tokio::test]
async fn sign_in_session_lifecycle() {
    let base = common::identity_server::start();
    let identity = RemoteIdentity::new(format!("{base}/"), "anon-key");

    let err = identity.sign_in("carol@example.com", "wrong").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "sign in failed (HTTP 400): Invalid login credentials"
    );

    let session = identity
        .sign_in("carol@example.com", common::identity_server::PASSWORD)
        .await
        .unwrap();
    assert_eq!(session.user.handle, "carol");

    let me = identity.current_user(&session.access_token).await.unwrap().unwrap();
    assert_eq!(me.email, "carol@example.com");
    assert!(identity.current_user("garbage").await.unwrap().is_none());

    identity.sign_out(&session).await.unwrap();
}

#[tokio::test]
async fn sign_in_failure_surfaces_as_remote_error() {
    let base = common::identity_server::start();
    let state = tempdir().unwrap();
    let store = Arc::new(SqliteStore::open_at(&state.path().join("ushare.db")).await.unwrap());
    let accounts = AccountService::new(Arc::new(RemoteIdentity::new(base, "anon-key")), store);

    let err = accounts.sign_in("dave@example.com", "nope").await.unwrap_err();
    assert!(matches!(err, CoreError::Remote(_)));
    assert!(err.to_string().contains("Invalid login credentials"));
}
