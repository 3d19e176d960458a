//! Link entry reconciler.
//!
//! An `EditSession` owns the two inputs of an add/edit interaction (the short
//! handle and the full link) and decides which one is authoritative:
//!
//! - selecting a template seeds the link from the template's URL builder
//! - handle edits re-derive the link, unless the template is custom or the
//!   user has typed into the link field
//! - the first link edit latches `link_manually_edited`; from then on handle
//!   edits never touch the link until the template is reselected
//!
//! On submit the link is normalized and a `LinkDraft` is emitted for the
//! persistence layer. Sessions are single-owner and synchronous; each event is
//! applied fully before the next.

mod reconciler;

pub use reconciler::{EditSession, SessionMode, SessionState, Submission};
