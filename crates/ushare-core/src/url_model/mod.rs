//! URL modeling for profile links.
//!
//! Canonicalizes user-typed links into absolute HTTP(S) URLs and derives a
//! display handle from a link when no explicit handle was given. Both
//! operations are total: malformed input degrades to identity or fallback
//! output instead of erroring.

mod handle;
mod normalize;

pub use handle::derive_handle;
pub use normalize::{has_http_scheme, normalize_url};
