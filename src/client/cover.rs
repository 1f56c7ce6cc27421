use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org/b/id";
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/200x300?text=No+Cover";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[value(rename_all = "verbatim")]
pub enum CoverSize {
    S,
    #[default]
    M,
    L,
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverSize::S => write!(f, "S"),
            CoverSize::M => write!(f, "M"),
            CoverSize::L => write!(f, "L"),
        }
    }
}

/// Builds cover image URLs against a configurable host.
#[derive(Debug, Clone)]
pub struct CoverUrls {
    base_url: String,
    placeholder_url: String,
}

impl CoverUrls {
    pub fn new(base_url: &str, placeholder_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            placeholder_url: placeholder_url.to_string(),
        }
    }

    /// Ids of zero or below mean "no cover" and get the placeholder.
    pub fn url(&self, cover_id: Option<i64>, size: CoverSize) -> String {
        match cover_id.filter(|id| *id > 0) {
            Some(id) => format!("{}/{}-{}.jpg", self.base_url, id, size),
            None => self.placeholder_url.clone(),
        }
    }
}

impl Default for CoverUrls {
    fn default() -> Self {
        Self::new(DEFAULT_COVERS_URL, PLACEHOLDER_COVER_URL)
    }
}

/// Cover URL on the public covers host.
pub fn cover_url(cover_id: Option<i64>, size: CoverSize) -> String {
    CoverUrls::default().url(cover_id, size)
}
