//! Error taxonomy shared by the reconciler, services and CLI.

use thiserror::Error;

/// A required field or precondition is missing.
///
/// The reconciler never raises these from `submit`; it reports them through
/// `EditSession::blocked_reason` so callers can keep the submit action disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no platform template selected")]
    NoTemplate,
    #[error("link is empty")]
    EmptyLink,
    #[error("handle is empty")]
    EmptyHandle,
    #[error("username is required")]
    MissingUsername,
    #[error("cannot follow your own profile")]
    SelfFollow,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Lookup of a handle, link or template yielded nothing.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A collaborator (store, identity service) call failed. Local state is
    /// left as it was before the call.
    #[error("remote call failed: {0:#}")]
    Remote(anyhow::Error),

    /// Another submission is still pending and the submit policy is `reject`.
    #[error("a submission is already in flight")]
    InFlight,
}

impl CoreError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Converts a collaborator failure into `CoreError::Remote`, logging it once.
pub(crate) fn remote(context: &str) -> impl FnOnce(anyhow::Error) -> CoreError + '_ {
    move |err| {
        tracing::warn!("{context} failed: {err:#}");
        CoreError::Remote(err)
    }
}
