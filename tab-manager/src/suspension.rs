//! Suspension Codec
//!
//! Replaces a tab's page with a tiny self-contained `data:` page that keeps
//! the title, the favicon and a full-page link back to the original URL.
//! The page needs no extension code to work, so suspended tabs survive the
//! organizer being disabled or uninstalled.
//!
//! Decoding is the job of [`crate::url_parts`]; whatever is encoded here
//! must stay readable by [`crate::url_parts::DataPageDecoder`].

use crate::config::TabManagerConfig;
use crate::url_parts::{self, UrlParts, SUSPENDED_URL_PREFIX};
use base64::Engine;
use image::imageops::FilterType;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use tab_organizer_core::SuspensionError;
use tracing::{debug, warn};
use url::Url;

/// Characters escaped in the page payload; mirrors what `encodeURI` escapes
const PAYLOAD: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Why a tab was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    AlreadySuspended,
    /// Browser-internal, extension or local file page
    ExcludedScheme,
    InvalidUrl,
    /// Even the smallest encoding exceeds the URL ceiling
    TooLong,
}

/// Result of encoding a tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuspendOutcome {
    /// The suspended page URL to load into the tab
    Suspended(String),
    Skipped(SkipReason),
}

/// Encoder for suspended pages
#[derive(Debug, Clone)]
pub struct SuspensionCodec {
    title_max_chars: usize,
    url_limit: usize,
    favicon_size: u32,
    favicon_opacity: f32,
    favicon_quality: u8,
    excluded_url_prefixes: Vec<String>,
}

impl SuspensionCodec {
    pub fn new(config: &TabManagerConfig) -> Self {
        Self {
            title_max_chars: config.title_max_chars,
            url_limit: config.suspended_url_limit,
            favicon_size: config.favicon_size,
            favicon_opacity: config.favicon_opacity.clamp(0.0, 1.0),
            favicon_quality: config.favicon_quality.clamp(1, 100),
            excluded_url_prefixes: config.excluded_url_prefixes.clone(),
        }
    }

    /// Whether the URL is a page suspended by this codec
    pub fn is_suspended(url: &str) -> bool {
        url.starts_with(SUSPENDED_URL_PREFIX)
    }

    /// Reason to leave a URL untouched, checked before any favicon work
    pub fn skip_reason(&self, url: &str) -> Option<SkipReason> {
        if Self::is_suspended(url) {
            return Some(SkipReason::AlreadySuspended);
        }
        if self
            .excluded_url_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
        {
            return Some(SkipReason::ExcludedScheme);
        }
        None
    }

    /// Build the suspended page URL for a tab.
    ///
    /// `favicon` is a `data:` URL as produced by [`Self::render_favicon`].
    /// When the result would exceed the URL ceiling the icon is dropped
    /// first, then the title is shortened further; if nothing fits the tab
    /// is skipped.
    pub fn encode(&self, url: &str, title: &str, favicon: Option<&str>) -> SuspendOutcome {
        if let Some(reason) = self.skip_reason(url) {
            return SuspendOutcome::Skipped(reason);
        }
        let href = match Url::parse(url) {
            Ok(parsed) => escape_html(parsed.as_str()),
            Err(_) => return SuspendOutcome::Skipped(SkipReason::InvalidUrl),
        };

        let full_title = escape_html(&truncate_title(title, self.title_max_chars));
        let short_title = escape_html(&truncate_title(title, self.title_max_chars / 4));
        let attempts = [
            (favicon, full_title.as_str()),
            (None, full_title.as_str()),
            (None, short_title.as_str()),
        ];

        for (icon, title) in attempts {
            let markup = page_markup(&href, title, icon);
            let suspended = format!("{}{}", SUSPENDED_URL_PREFIX, utf8_percent_encode(&markup, PAYLOAD));
            if suspended.len() <= self.url_limit {
                return SuspendOutcome::Suspended(suspended);
            }
            debug!("Suspended page for {} is {} chars, shrinking", url, suspended.len());
        }

        warn!("Cannot suspend {}: URL too long for a suspended page", url);
        SuspendOutcome::Skipped(SkipReason::TooLong)
    }

    /// Longest URL [`Self::encode`] may emit
    pub fn url_limit(&self) -> usize {
        self.url_limit
    }

    /// Parts of the original page behind a suspended URL
    pub fn decode(&self, suspended: &str) -> UrlParts {
        url_parts::resolve(suspended)
    }

    /// Turn raw favicon bytes into a small lossy `data:` image.
    ///
    /// The icon is scaled to the configured edge and drawn at reduced
    /// opacity over white, which drops the alpha channel and lets it be
    /// stored as JPEG.
    pub fn render_favicon(&self, page_url: &str, bytes: &[u8]) -> Result<String, SuspensionError> {
        let icon = image::load_from_memory(bytes).map_err(|e| SuspensionError::FaviconDecodeFailed {
            page_url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        let size = self.favicon_size.max(1);
        let icon = if icon.width() != size || icon.height() != size {
            icon.resize_exact(size, size, FilterType::Triangle)
        } else {
            icon
        }
        .to_rgba8();

        let mut canvas = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        for (x, y, pixel) in icon.enumerate_pixels() {
            let alpha = pixel[3] as f32 / 255.0 * self.favicon_opacity;
            let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
            canvas.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.favicon_quality)
            .encode_image(&canvas)
            .map_err(|e| SuspensionError::FaviconEncodeFailed { reason: e.to_string() })?;

        Ok(format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&jpeg)
        ))
    }
}

impl Default for SuspensionCodec {
    fn default() -> Self {
        Self::new(&TabManagerConfig::default())
    }
}

/// Cut a title to `max_chars` characters, marking the cut with `...`
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Minified markup of a suspended page.
///
/// Optional tags and attribute quotes are left out to keep the URL short.
/// The whole page is one link to the original; the script copies the icon
/// into the page and the link text into the document title.
fn page_markup(href: &str, title: &str, icon: Option<&str>) -> String {
    let mut html = String::with_capacity(640);
    html.push_str("<!DOCTYPE html><html style=height:100%>");
    if let Some(icon) = icon {
        html.push_str(&format!("<link rel=icon href=\"{}\">", icon));
    }
    html.push_str("<body style=height:100%;margin:0;background-color:#e0e0e0>");
    html.push_str(&format!(
        "<a href=\"{}\" style=\"width:60%;height:90%;display:inline-block;text-decoration:none;padding:5% 20%;color:#44f\">",
        href
    ));
    html.push_str("<h2 style=font-weight:normal>");
    if icon.is_some() {
        html.push_str("<img style=padding:2px;background-color:#fff;zoom:3><br><br>");
    }
    html.push_str(title);
    html.push_str("</h2> suspended</a><script>var d=document;var l=d.links[0];");
    if icon.is_some() {
        html.push_str("d.images[0].src=d.querySelector(\"link\").href;");
    }
    html.push_str("d.title=l.text.trim();l.focus();</script>");
    html
}
