//! Signed-in owner's view: link list, commits, follows and the share URL.
//!
//! The local list mirrors the store and only changes after the store accepted
//! the corresponding write, so a failed call leaves it untouched.

mod guard;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::SubmitPolicy;
use crate::error::{remote, CoreError, CoreResult, ValidationError};
use crate::model::{public_profile_url, AuthSession, FriendEntry, LinkId, LinkView, ProfileLink, UserId};
use crate::session::Submission;
use crate::store::{LinkStore, SocialGraph};

pub use guard::SubmitGuard;

pub struct Dashboard<S: ?Sized> {
    store: Arc<S>,
    session: AuthSession,
    links: Mutex<Vec<LinkView>>,
    guard: SubmitGuard,
}

impl<S> Dashboard<S>
where
    S: LinkStore + SocialGraph + ?Sized,
{
    pub fn new(store: Arc<S>, session: AuthSession, policy: SubmitPolicy) -> Self {
        Self {
            store,
            session,
            links: Mutex::new(Vec::new()),
            guard: SubmitGuard::new(policy),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn owner(&self) -> &UserId {
        &self.session.user.id
    }

    fn local(&self) -> MutexGuard<'_, Vec<LinkView>> {
        self.links.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reloads the owner's links from the store.
    pub async fn refresh(&self) -> CoreResult<Vec<LinkView>> {
        let links = self
            .store
            .list_by_owner(self.owner())
            .await
            .map_err(remote("load links"))?;
        let views: Vec<LinkView> = links.into_iter().map(LinkView::from).collect();
        *self.local() = views.clone();
        tracing::debug!(count = views.len(), "links refreshed");
        Ok(views)
    }

    /// Snapshot of the local list, oldest first.
    pub fn links(&self) -> Vec<LinkView> {
        self.local().clone()
    }

    pub fn link(&self, id: LinkId) -> Option<LinkView> {
        self.local().iter().find(|v| v.link.id == id).cloned()
    }

    /// Persists a submitted edit session: a create in add mode, an update in edit mode.
    ///
    /// Returns `Ok(None)` when the submit policy dropped the commit.
    pub async fn commit(&self, submission: Submission) -> CoreResult<Option<LinkView>> {
        let Some(_slot) = self.guard.admit().await? else {
            return Ok(None);
        };
        let Submission { target, draft } = submission;

        let view = match target {
            None => {
                let link = self
                    .store
                    .create(self.owner(), &draft)
                    .await
                    .map_err(remote("create link"))?;
                let view = LinkView::from(link);
                self.local().push(view.clone());
                tracing::info!(id = view.link.id, platform = %view.link.platform, "link added");
                view
            }
            Some(id) => {
                let found = self
                    .store
                    .update(self.owner(), id, &draft)
                    .await
                    .map_err(remote("update link"))?;
                if !found {
                    return Err(CoreError::not_found("link", id.to_string()));
                }
                let known = self.link(id);
                let view = match known {
                    Some(old) => LinkView::from(ProfileLink {
                        platform: draft.platform,
                        username: draft.username,
                        url: draft.url,
                        ..old.link
                    }),
                    None => {
                        self.refresh().await?;
                        self.link(id)
                            .ok_or_else(|| CoreError::not_found("link", id.to_string()))?
                    }
                };
                if let Some(slot) = self.local().iter_mut().find(|v| v.link.id == id) {
                    *slot = view.clone();
                }
                tracing::info!(id, platform = %view.link.platform, "link updated");
                view
            }
        };
        Ok(Some(view))
    }

    /// Removes a link for good. Callers confirm with the user first.
    pub async fn delete(&self, id: LinkId) -> CoreResult<()> {
        let found = self
            .store
            .delete(self.owner(), id)
            .await
            .map_err(remote("delete link"))?;
        if !found {
            return Err(CoreError::not_found("link", id.to_string()));
        }
        self.local().retain(|v| v.link.id != id);
        tracing::info!(id, "link deleted");
        Ok(())
    }

    pub fn share_url(&self, base: &str) -> String {
        public_profile_url(base, &self.session.user.handle)
    }

    /// Follows the profile `handle`. Returns false if it was already followed.
    pub async fn follow(&self, handle: &str) -> CoreResult<bool> {
        let handle = handle.trim();
        let friend = self
            .store
            .find_by_handle(handle)
            .await
            .map_err(remote("look up profile"))?
            .ok_or_else(|| CoreError::not_found("profile", handle))?;
        if &friend == self.owner() {
            return Err(ValidationError::SelfFollow.into());
        }
        let added = self
            .store
            .add_friend(self.owner(), &friend)
            .await
            .map_err(remote("follow"))?;
        tracing::info!(handle, added, "follow");
        Ok(added)
    }

    /// Followed accounts, most recent first.
    pub async fn friends(&self) -> CoreResult<Vec<FriendEntry>> {
        self.store
            .list_friends(self.owner())
            .await
            .map_err(remote("load friends"))
    }
}

/// Links shown on the public page of `handle`.
pub async fn public_profile<S: LinkStore + ?Sized>(store: &S, handle: &str) -> CoreResult<Vec<LinkView>> {
    let handle = handle.trim();
    let owner = store
        .find_by_handle(handle)
        .await
        .map_err(remote("look up profile"))?
        .ok_or_else(|| CoreError::not_found("user", handle))?;
    let links = store
        .list_by_owner(&owner)
        .await
        .map_err(remote("load links"))?;
    Ok(links.into_iter().map(LinkView::from).collect())
}
