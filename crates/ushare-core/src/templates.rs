//! Platform template registry.
//!
//! A fixed, ordered catalog of known platforms. Order is display order and the
//! `custom` entry is always last. Each template knows how to build its
//! canonical profile URL from a short handle and, for the known platforms, how
//! to pull a handle back out of a pasted URL.

use std::fmt;

use crate::icon::IconRef;

type BuildUrl = fn(&str) -> String;
type ExtractUsername = fn(&str) -> Option<String>;

/// Registry entry describing how to turn a handle into a profile URL.
pub struct PlatformTemplate {
    /// Stable identifier (`instagram`, `twitter`, ...).
    pub id: &'static str,
    /// Short label shown next to the handle field (e.g. `instagram.com`).
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Stored as `ProfileLink::platform`.
    pub display_name: &'static str,
    pub icon: IconRef,
    /// Custom links have no handle field; the link is the source of truth.
    pub is_custom: bool,
    build: BuildUrl,
    extract: Option<ExtractUsername>,
}

impl fmt::Debug for PlatformTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformTemplate")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("is_custom", &self.is_custom)
            .finish_non_exhaustive()
    }
}

impl PlatformTemplate {
    pub fn build_url(&self, handle: &str) -> String {
        (self.build)(handle)
    }

    /// Handle contained in `url`, if this template can recognise it.
    pub fn extract_username(&self, url: &str) -> Option<String> {
        self.extract.and_then(|extract| extract(url))
    }

    pub fn can_extract(&self) -> bool {
        self.extract.is_some()
    }
}

static TEMPLATES: [PlatformTemplate; 5] = [
    PlatformTemplate {
        id: "instagram",
        label: "instagram.com",
        placeholder: "your nickname",
        display_name: "Instagram",
        icon: IconRef::Instagram,
        is_custom: false,
        build: instagram_url,
        extract: Some(instagram_handle),
    },
    PlatformTemplate {
        id: "twitter",
        label: "x.com",
        placeholder: "your nickname",
        display_name: "X",
        icon: IconRef::Twitter,
        is_custom: false,
        build: x_url,
        extract: Some(x_handle),
    },
    PlatformTemplate {
        id: "linkedin",
        label: "linkedin.com",
        placeholder: "your nickname",
        display_name: "LinkedIn",
        icon: IconRef::LinkedIn,
        is_custom: false,
        build: linkedin_url,
        extract: Some(linkedin_handle),
    },
    PlatformTemplate {
        id: "youtube",
        label: "youtube.com",
        placeholder: "your nickname",
        display_name: "YouTube",
        icon: IconRef::YouTube,
        is_custom: false,
        build: youtube_url,
        extract: Some(youtube_handle),
    },
    PlatformTemplate {
        id: "custom",
        label: "custom site",
        placeholder: "your nickname",
        display_name: "Custom Site",
        icon: IconRef::AddLink,
        is_custom: true,
        build: custom_url,
        extract: None,
    },
];

fn instagram_url(handle: &str) -> String {
    format!("https://www.instagram.com/{handle}")
}

fn instagram_handle(url: &str) -> Option<String> {
    first_segment(url, &["instagram.com"])
}

fn x_url(handle: &str) -> String {
    format!("https://x.com/{}", handle.strip_prefix('@').unwrap_or(handle))
}

fn x_handle(url: &str) -> Option<String> {
    first_segment(url, &["x.com", "twitter.com"])
}

fn linkedin_url(handle: &str) -> String {
    format!("https://www.linkedin.com/in/{handle}")
}

fn linkedin_handle(url: &str) -> Option<String> {
    let mut segments = path_segments(url, &["linkedin.com"])?.into_iter();
    match segments.next() {
        Some(first) if first == "in" => segments.next(),
        _ => None,
    }
}

fn youtube_url(handle: &str) -> String {
    if handle.starts_with('@') {
        format!("https://www.youtube.com/{handle}")
    } else {
        format!("https://www.youtube.com/@{handle}")
    }
}

/// Only `@handle` channel URLs; `/watch`, `/channel/...` are not handles.
fn youtube_handle(url: &str) -> Option<String> {
    first_segment(url, &["youtube.com"]).filter(|h| h.starts_with('@'))
}

/// The custom "handle" is the whole URL minus its scheme.
fn custom_url(rest: &str) -> String {
    format!("https://{rest}")
}

/// All templates in display order.
pub fn templates() -> &'static [PlatformTemplate] {
    &TEMPLATES
}

/// Template by id.
pub fn find(id: &str) -> Option<&'static PlatformTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Template whose display name matches `name`, ignoring case.
pub fn find_by_display_name(name: &str) -> Option<&'static PlatformTemplate> {
    TEMPLATES
        .iter()
        .find(|t| t.display_name.eq_ignore_ascii_case(name.trim()))
}

/// The terminal custom-site template.
pub fn custom() -> &'static PlatformTemplate {
    &TEMPLATES[TEMPLATES.len() - 1]
}

/// Non-empty path segments of `url` if its host is one of `hosts` (optionally `www.`-prefixed).
fn path_segments(url: &str, hosts: &[&str]) -> Option<Vec<String>> {
    let parsed = url::Url::parse(&crate::url_model::normalize_url(url.trim())).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if !hosts.contains(&host) {
        return None;
    }
    let segments = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Some(segments)
}

fn first_segment(url: &str, hosts: &[&str]) -> Option<String> {
    path_segments(url, hosts)?.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(id: &str, handle: &str) -> String {
        find(id).unwrap().build_url(handle)
    }

    #[test]
    fn display_order_is_fixed() {
        let ids: Vec<&str> = templates().iter().map(|t| t.id).collect();
        assert_eq!(ids, ["instagram", "twitter", "linkedin", "youtube", "custom"]);
    }

    #[test]
    fn only_last_entry_is_custom() {
        let all = templates();
        assert!(all[..all.len() - 1].iter().all(|t| !t.is_custom));
        assert!(custom().is_custom);
        assert_eq!(custom().id, "custom");
    }

    #[test]
    fn ids_unique() {
        let all = templates();
        for (i, t) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|o| o.id != t.id), "duplicate id {}", t.id);
        }
    }

    #[test]
    fn build_urls() {
        assert_eq!(build("instagram", "alice"), "https://www.instagram.com/alice");
        assert_eq!(build("twitter", "@foo"), "https://x.com/foo");
        assert_eq!(build("twitter", "foo"), "https://x.com/foo");
        assert_eq!(build("linkedin", "carol"), "https://www.linkedin.com/in/carol");
        assert_eq!(build("youtube", "foo"), "https://www.youtube.com/@foo");
        assert_eq!(build("youtube", "@foo"), "https://www.youtube.com/@foo");
        assert_eq!(build("custom", "mysite.com/alice"), "https://mysite.com/alice");
    }

    #[test]
    fn build_with_empty_handle_seeds_prefix() {
        assert_eq!(build("instagram", ""), "https://www.instagram.com/");
        assert_eq!(build("youtube", ""), "https://www.youtube.com/@");
    }

    #[test]
    fn twitter_strips_only_one_at() {
        assert_eq!(build("twitter", "@@foo"), "https://x.com/@foo");
    }

    #[test]
    fn lookup() {
        assert_eq!(find("youtube").unwrap().display_name, "YouTube");
        assert!(find("myspace").is_none());
        assert_eq!(find_by_display_name("linkedin").unwrap().id, "linkedin");
        assert_eq!(find_by_display_name("x").unwrap().id, "twitter");
        assert_eq!(find_by_display_name("Custom Site").unwrap().id, "custom");
        assert!(find_by_display_name("Mastodon").is_none());
    }

    #[test]
    fn extract_known_hosts() {
        let ig = find("instagram").unwrap();
        assert_eq!(ig.extract_username("https://www.instagram.com/bob/").as_deref(), Some("bob"));
        assert_eq!(ig.extract_username("instagram.com/bob").as_deref(), Some("bob"));
        assert_eq!(ig.extract_username("https://override.com"), None);
        assert_eq!(ig.extract_username("https://www.instagram.com/"), None);

        let x = find("twitter").unwrap();
        assert_eq!(x.extract_username("https://twitter.com/foo").as_deref(), Some("foo"));
        assert_eq!(x.extract_username("https://x.com/foo?s=20").as_deref(), Some("foo"));

        let li = find("linkedin").unwrap();
        assert_eq!(
            li.extract_username("https://www.linkedin.com/in/carol").as_deref(),
            Some("carol")
        );
        assert_eq!(li.extract_username("https://www.linkedin.com/company/acme"), None);

        let yt = find("youtube").unwrap();
        assert_eq!(
            yt.extract_username("https://www.youtube.com/@foo").as_deref(),
            Some("@foo")
        );
        assert_eq!(yt.extract_username("https://www.youtube.com/watch?v=1"), None);
    }

    #[test]
    fn extracted_handle_rebuilds_same_url() {
        for (id, url) in [
            ("instagram", "https://www.instagram.com/alice"),
            ("twitter", "https://x.com/foo"),
            ("linkedin", "https://www.linkedin.com/in/carol"),
            ("youtube", "https://www.youtube.com/@foo"),
        ] {
            let t = find(id).unwrap();
            let handle = t.extract_username(url).unwrap();
            assert_eq!(t.build_url(&handle), url, "template {id}");
        }
    }

    #[test]
    fn custom_has_no_extractor() {
        assert!(!custom().can_extract());
        assert_eq!(custom().extract_username("https://mysite.com/alice"), None);
    }
}
