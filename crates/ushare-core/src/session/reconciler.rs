//! `EditSession` state and transitions.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::model::{LinkDraft, LinkId, ProfileLink};
use crate::templates::{self, PlatformTemplate};
use crate::url_model::{derive_handle, normalize_url};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No template selected.
    Idle,
    /// Template selected; the link follows the handle.
    TemplateSelected,
    /// Template selected; the link field has been typed into and is decoupled.
    LinkManuallyEdited,
    /// Terminal: a draft was emitted.
    Submitted,
    /// Terminal: the session was discarded.
    Cancelled,
}

/// Whether the session creates a new link or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Add,
    Edit(LinkId),
}

impl SessionMode {
    fn target(self) -> Option<LinkId> {
        match self {
            SessionMode::Add => None,
            SessionMode::Edit(id) => Some(id),
        }
    }
}

/// Platform and username of the record an edit session was seeded from.
/// Emitted unchanged until the template is re-selected or the link edited.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Seed {
    platform: String,
    username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finished {
    Submitted,
    Cancelled,
}

/// Output of a successful submit. `target` is the edited link's id in edit
/// mode; the id of a new link is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub target: Option<LinkId>,
    pub draft: LinkDraft,
}

/// Ephemeral state of one add/edit interaction.
#[derive(Debug, Clone)]
pub struct EditSession {
    mode: SessionMode,
    template: Option<&'static PlatformTemplate>,
    handle_input: String,
    link_input: String,
    link_manually_edited: bool,
    seed: Option<Seed>,
    finished: Option<Finished>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// New add-mode session in `Idle`.
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Add,
            template: None,
            handle_input: String::new(),
            link_input: String::new(),
            link_manually_edited: false,
            seed: None,
            finished: None,
        }
    }

    /// Edit-mode session seeded from an existing record.
    ///
    /// The stored platform is matched against template display names, then
    /// template ids (older rows stored the id); anything else is treated as a
    /// custom link. Username and URL are taken verbatim from the record, and
    /// so are platform and username on submit unless the template is
    /// re-selected or the link is edited.
    pub fn from_link(link: &ProfileLink) -> Self {
        let template = templates::find_by_display_name(&link.platform)
            .or_else(|| templates::find(&link.platform))
            .unwrap_or_else(templates::custom);
        tracing::debug!(
            link_id = link.id,
            platform = %link.platform,
            template = template.id,
            "edit session seeded"
        );
        Self {
            mode: SessionMode::Edit(link.id),
            template: Some(template),
            handle_input: link.username.clone(),
            link_input: link.url.clone(),
            link_manually_edited: false,
            seed: Some(Seed {
                platform: link.platform.clone(),
                username: link.username.clone(),
            }),
            finished: None,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        match (self.finished, self.template) {
            (Some(Finished::Submitted), _) => SessionState::Submitted,
            (Some(Finished::Cancelled), _) => SessionState::Cancelled,
            (None, None) => SessionState::Idle,
            (None, Some(_)) if self.link_manually_edited => SessionState::LinkManuallyEdited,
            (None, Some(_)) => SessionState::TemplateSelected,
        }
    }

    pub fn selected_template(&self) -> Option<&'static PlatformTemplate> {
        self.template
    }

    pub fn handle(&self) -> &str {
        &self.handle_input
    }

    pub fn link(&self) -> &str {
        &self.link_input
    }

    pub fn link_manually_edited(&self) -> bool {
        self.link_manually_edited
    }

    /// Whether a separate handle field applies (false for custom links).
    pub fn shows_handle_field(&self) -> bool {
        self.template.is_some_and(|t| !t.is_custom)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    fn ignore_if_finished(&self, event: &str) -> bool {
        if let Some(finished) = self.finished {
            tracing::debug!(?finished, event, "event after session end ignored");
            return true;
        }
        false
    }

    /// Selects a template, or deselects it if `id` is already selected.
    ///
    /// Selecting resets the handle, seeds the link from `build_url("")` (empty
    /// for custom templates) and clears the manual-edit latch. Deselecting
    /// returns to `Idle` with both inputs empty. An unknown id leaves the
    /// session untouched.
    pub fn select_template(&mut self, id: &str) -> CoreResult<()> {
        if self.ignore_if_finished("select_template") {
            return Ok(());
        }
        let template = templates::find(id).ok_or_else(|| CoreError::not_found("template", id))?;

        self.handle_input.clear();
        self.link_manually_edited = false;
        self.seed = None;

        if self.template.is_some_and(|t| t.id == template.id) {
            self.template = None;
            self.link_input.clear();
            tracing::debug!(template = id, "template deselected");
            return Ok(());
        }

        self.template = Some(template);
        self.link_input = if template.is_custom {
            String::new()
        } else {
            template.build_url("")
        };
        tracing::debug!(template = id, link = %self.link_input, "template selected");
        Ok(())
    }

    /// Updates the handle and, unless the link is latched or custom, re-derives
    /// the link from the trimmed handle.
    pub fn edit_handle(&mut self, value: &str) {
        if self.ignore_if_finished("edit_handle") {
            return;
        }
        self.handle_input = value.to_string();

        let Some(template) = self.template else {
            return;
        };
        if template.is_custom || self.link_manually_edited {
            return;
        }
        let handle = value.trim();
        self.link_input = if handle.is_empty() {
            String::new()
        } else {
            template.build_url(handle)
        };
    }

    /// Updates the link verbatim and latches it against handle edits.
    ///
    /// If the selected template recognises the link, the handle is updated to
    /// the one it contains.
    pub fn edit_link(&mut self, value: &str) {
        if self.ignore_if_finished("edit_link") {
            return;
        }
        self.link_input = value.to_string();
        if !self.link_manually_edited {
            tracing::debug!("link manually edited; handle no longer drives link");
        }
        self.link_manually_edited = true;
        self.seed = None;

        if let Some(handle) = self.template.and_then(|t| t.extract_username(value)) {
            self.handle_input = handle;
        }
    }

    /// Why submit is currently disabled, if it is.
    pub fn blocked_reason(&self) -> Option<ValidationError> {
        let Some(template) = self.template else {
            return Some(ValidationError::NoTemplate);
        };
        if self.link_input.trim().is_empty() {
            return Some(ValidationError::EmptyLink);
        }
        if !template.is_custom && self.handle_input.trim().is_empty() {
            return Some(ValidationError::EmptyHandle);
        }
        None
    }

    pub fn can_submit(&self) -> bool {
        !self.is_finished() && self.blocked_reason().is_none()
    }

    /// Finalizes the session and emits a draft, or emits nothing if submit is disabled.
    ///
    /// The link is normalized. For custom templates the username is derived
    /// from the normalized link; otherwise it is the trimmed handle.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.ignore_if_finished("submit") {
            return None;
        }
        if let Some(reason) = self.blocked_reason() {
            tracing::debug!(%reason, "submit disabled");
            return None;
        }
        let template = self.template?;

        let url = normalize_url(self.link_input.trim());
        let username = match &self.seed {
            Some(seed) if template.is_custom => seed.username.clone(),
            _ if template.is_custom => derive_handle(&url),
            _ => self.handle_input.trim().to_string(),
        };
        let platform = match self.seed.take() {
            Some(seed) => seed.platform,
            None => template.display_name.to_string(),
        };
        let draft = LinkDraft {
            platform,
            username,
            url,
        };

        self.finished = Some(Finished::Submitted);
        tracing::debug!(?draft, mode = ?self.mode, "session submitted");
        Some(Submission {
            target: self.mode.target(),
            draft,
        })
    }

    /// Discards the session.
    pub fn cancel(&mut self) {
        if self.ignore_if_finished("cancel") {
            return;
        }
        self.template = None;
        self.handle_input.clear();
        self.link_input.clear();
        self.link_manually_edited = false;
        self.seed = None;
        self.finished = Some(Finished::Cancelled);
        tracing::debug!("session cancelled");
    }
}
