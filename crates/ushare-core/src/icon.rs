//! Platform icon resolution.
//!
//! Icons are derived from a link's platform display name at read time and are
//! never stored. Matching is a lossy keyword lookup: anything unrecognised gets
//! the Instagram icon.

use serde::Serialize;

/// Reference to a bundled icon asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconRef {
    Instagram,
    Twitter,
    LinkedIn,
    YouTube,
    /// Generic "add link" glyph, used by the custom-site template.
    AddLink,
}

impl IconRef {
    pub fn asset_path(self) -> &'static str {
        match self {
            IconRef::Instagram => "assets/social/instagram.svg",
            IconRef::Twitter => "assets/social/twitter.svg",
            IconRef::LinkedIn => "assets/social/linkedin.svg",
            IconRef::YouTube => "assets/social/youtube.svg",
            IconRef::AddLink => "assets/icons/add.svg",
        }
    }
}

/// Icon used when no keyword matches.
pub const FALLBACK_ICON: IconRef = IconRef::Instagram;

/// Keyword table in priority order; first substring hit wins.
const ICON_KEYWORDS: &[(&str, IconRef)] = &[
    ("instagram", IconRef::Instagram),
    ("twitter", IconRef::Twitter),
    ("linkedin", IconRef::LinkedIn),
    ("youtube", IconRef::YouTube),
];

/// Resolves the icon for a platform display name.
///
/// Case-insensitive substring match against known platform keywords; the
/// display name `X` (exactly, any case) also maps to the Twitter icon.
pub fn icon_for(platform: &str) -> IconRef {
    let lower = platform.to_lowercase();
    for (keyword, icon) in ICON_KEYWORDS {
        if lower.contains(keyword) {
            return *icon;
        }
        if *icon == IconRef::Twitter && lower == "x" {
            return IconRef::Twitter;
        }
    }
    FALLBACK_ICON
}
