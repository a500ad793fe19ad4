//! Tab manager configuration

use serde::{Deserialize, Serialize};

/// Configuration for the tab manager engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabManagerConfig {
    /// Marks a search keyword as a command (`:de`, `:au`)
    pub command_prefix: String,
    /// Suspended page titles longer than this are cut and get an ellipsis
    pub title_max_chars: usize,
    /// Hard ceiling for a suspended tab URL
    pub suspended_url_limit: usize,
    /// Edge length of the favicon embedded into suspended pages, in pixels
    pub favicon_size: u32,
    /// Opacity of the favicon drawn over its white background (0.0 - 1.0)
    pub favicon_opacity: f32,
    /// JPEG quality of the embedded favicon (1 - 100)
    pub favicon_quality: u8,
    /// URL prefixes that are never suspended
    pub excluded_url_prefixes: Vec<String>,
    /// Host prefix of the site whose tabs sort by the figure in their title
    pub affinity_site: String,
    /// Figure used for affinity-site titles without a recognizable count
    pub affinity_sentinel: u64,
}

impl Default for TabManagerConfig {
    fn default() -> Self {
        Self {
            command_prefix: ":".to_string(),
            title_max_chars: 140,
            suspended_url_limit: 2048,
            favicon_size: 16,
            favicon_opacity: 0.5,
            favicon_quality: 50,
            excluded_url_prefixes: vec![
                "chrome:".to_string(),
                "chrome-extension:".to_string(),
                "edge:".to_string(),
                "about:".to_string(),
                "moz-extension:".to_string(),
                "file:".to_string(),
            ],
            affinity_site: "www.goodreads.com".to_string(),
            affinity_sentinel: 1_000_000,
        }
    }
}
