//! Records exchanged between the reconciler, the services and the collaborators.

use serde::{Deserialize, Serialize};

use crate::icon::{icon_for, IconRef};

/// Link identifier, assigned by the store.
pub type LinkId = i64;

/// User identifier, assigned by the identity service.
pub type UserId = String;

/// A persisted profile link, owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub id: LinkId,
    pub owner_id: UserId,
    /// Template display name (e.g. `Instagram`), not the template id.
    pub platform: String,
    pub username: String,
    pub url: String,
    /// Unix seconds, assigned on insert.
    pub created_at: i64,
}

impl ProfileLink {
    pub fn icon(&self) -> IconRef {
        icon_for(&self.platform)
    }
}

/// Finalized link fields emitted by a submitted edit session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    pub platform: String,
    pub username: String,
    pub url: String,
}

/// A link ready for display, with its derived icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub link: ProfileLink,
    pub icon: IconRef,
}

impl From<ProfileLink> for LinkView {
    fn from(link: ProfileLink) -> Self {
        let icon = link.icon();
        Self { link, icon }
    }
}

/// Authenticated user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    /// Public handle; the profile lives at `/u/{handle}`.
    pub handle: String,
    pub email: String,
}

/// Result of a successful sign-in. Passed explicitly to anything that acts on
/// behalf of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: Account,
}

/// A searchable public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: UserId,
    pub handle: String,
}

/// Handle shown for a followed account whose profile row is missing.
pub const UNKNOWN_HANDLE: &str = "Unknown";

/// One followed account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEntry {
    /// Id of the follow relationship.
    pub id: i64,
    pub friend_id: UserId,
    pub handle: String,
}

/// Public share URL for a handle: `{base}/u/{handle}`.
pub fn public_profile_url(base: &str, handle: &str) -> String {
    format!("{}/u/{}", base.trim_end_matches('/'), handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(platform: &str) -> ProfileLink {
        ProfileLink {
            id: 1,
            owner_id: "u1".to_string(),
            platform: platform.to_string(),
            username: "alice".to_string(),
            url: "https://www.linkedin.com/in/alice".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn view_derives_icon_from_platform() {
        let view = LinkView::from(link("LinkedIn"));
        assert_eq!(view.icon, IconRef::LinkedIn);
        let view = LinkView::from(link("Custom Site"));
        assert_eq!(view.icon, IconRef::Instagram);
    }

    #[test]
    fn share_url() {
        assert_eq!(
            public_profile_url("https://ushare.example/", "alice"),
            "https://ushare.example/u/alice"
        );
        assert_eq!(
            public_profile_url("http://localhost:5173", "bob"),
            "http://localhost:5173/u/bob"
        );
    }
}
