//! Duplicate-submission handling for link commits.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::config::SubmitPolicy;
use crate::error::{CoreError, CoreResult};

/// Applies the configured `SubmitPolicy` to overlapping commits.
#[derive(Debug)]
pub struct SubmitGuard {
    policy: SubmitPolicy,
    pending: AtomicUsize,
    serial: Mutex<()>,
}

/// Marks one commit as in flight until dropped.
pub(super) struct PendingSlot<'a> {
    pending: &'a AtomicUsize,
    _serial: Option<MutexGuard<'a, ()>>,
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

impl SubmitGuard {
    pub fn new(policy: SubmitPolicy) -> Self {
        Self {
            policy,
            pending: AtomicUsize::new(0),
            serial: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.load(Ordering::Acquire) > 0
    }

    /// Reserves a slot for one commit.
    ///
    /// `Ok(None)` means the commit is dropped (policy `ignore`); `reject` fails
    /// with `CoreError::InFlight`; `queue` waits for the pending commit.
    pub(super) async fn admit(&self) -> CoreResult<Option<PendingSlot<'_>>> {
        match self.policy {
            SubmitPolicy::Allow => Ok(Some(self.occupy(None))),
            SubmitPolicy::Ignore | SubmitPolicy::Reject => {
                if self
                    .pending
                    .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    return Ok(Some(PendingSlot {
                        pending: &self.pending,
                        _serial: None,
                    }));
                }
                if self.policy == SubmitPolicy::Ignore {
                    tracing::debug!("commit ignored: another one is in flight");
                    Ok(None)
                } else {
                    Err(CoreError::InFlight)
                }
            }
            SubmitPolicy::Queue => {
                let serial = self.serial.lock().await;
                Ok(Some(self.occupy(Some(serial))))
            }
        }
    }

    fn occupy<'a>(&'a self, serial: Option<MutexGuard<'a, ()>>) -> PendingSlot<'a> {
        self.pending.fetch_add(1, Ordering::AcqRel);
        PendingSlot {
            pending: &self.pending,
            _serial: serial,
        }
    }
}
