//! URL Normalizer
//!
//! Resolves a possibly suspended tab URL to the URL of the page behind it.
//! Suspended pages come in several encodings; each one is handled by a
//! [`SuspensionDecoder`] and the [`UrlResolver`] tries them in order,
//! recursing into whatever URL a decoder extracts.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Signature every page suspended by this crate starts with (format version 1.0)
pub const SUSPENDED_URL_PREFIX: &str = "data:text/html;charset=utf-8,<!--BTM1.0-->";

/// Nested suspensions deeper than this are not unwrapped any further
const MAX_NESTING: usize = 8;

static ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href="([^"]*)""#).expect("anchor pattern compiles"));

static DEFAULT_RESOLVER: LazyLock<UrlResolver> = LazyLock::new(UrlResolver::new);

/// Structural parts of a URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    /// Scheme without the trailing colon
    pub scheme: String,
    /// Host name, with `:port` when the port is not the scheme's default
    pub host: String,
    pub path: String,
    /// Fragment without the leading `#`
    pub fragment: String,
    /// The complete, serialized URL
    pub full: String,
}

impl UrlParts {
    /// Split a URL into its parts without undoing any suspension.
    ///
    /// Input that does not parse as a URL yields empty parts with `full`
    /// set to the raw input.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => {
                let host = match (url.host_str(), url.port()) {
                    (Some(host), Some(port)) => format!("{}:{}", host, port),
                    (Some(host), None) => host.to_string(),
                    (None, _) => String::new(),
                };
                Self {
                    scheme: url.scheme().to_string(),
                    host,
                    path: url.path().to_string(),
                    fragment: url.fragment().unwrap_or_default().to_string(),
                    full: url.as_str().to_string(),
                }
            }
            Err(_) => Self {
                full: raw.to_string(),
                ..Default::default()
            },
        }
    }
}

/// One suspended-page encoding
pub trait SuspensionDecoder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// The URL embedded in `raw` if it is a page suspended in this format
    fn try_decode(&self, raw: &str, parts: &UrlParts) -> Option<String>;
}

/// Pages suspended by "The Great Suspender" style extensions:
/// `chrome-extension://<id>/suspended.html#ttl=...&uri=<url>`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionPageDecoder;

impl SuspensionDecoder for ExtensionPageDecoder {
    fn name(&self) -> &'static str {
        "extension-page"
    }

    fn try_decode(&self, _raw: &str, parts: &UrlParts) -> Option<String> {
        if !parts.scheme.starts_with("chrome-extension") || !parts.path.ends_with("/suspended.html") {
            return None;
        }
        let fragment = parts.fragment.as_str();
        if let Some(uri) = fragment.strip_prefix("uri=") {
            return Some(uri.to_string());
        }
        fragment
            .find("&uri=")
            .map(|pos| fragment[pos + "&uri=".len()..].to_string())
    }
}

/// Pages suspended by this crate: a data URL starting with
/// [`SUSPENDED_URL_PREFIX`] whose markup holds an anchor to the original page
#[derive(Debug, Clone, Copy, Default)]
pub struct DataPageDecoder;

impl SuspensionDecoder for DataPageDecoder {
    fn name(&self) -> &'static str {
        "data-page"
    }

    fn try_decode(&self, raw: &str, _parts: &UrlParts) -> Option<String> {
        let payload = raw.strip_prefix(SUSPENDED_URL_PREFIX)?;
        let markup = percent_decode_str(payload).decode_utf8_lossy();
        let href = ANCHOR_HREF.captures(&markup)?.get(1)?.as_str();
        Some(href.replace("&amp;", "&"))
    }
}

/// Ordered chain of suspension decoders
pub struct UrlResolver {
    decoders: Vec<Box<dyn SuspensionDecoder>>,
}

impl UrlResolver {
    /// Resolver that understands every built-in suspension format
    pub fn new() -> Self {
        Self::with_decoders(vec![Box::new(ExtensionPageDecoder), Box::new(DataPageDecoder)])
    }

    /// Resolver with an explicit decoder chain, tried front to back
    pub fn with_decoders(decoders: Vec<Box<dyn SuspensionDecoder>>) -> Self {
        Self { decoders }
    }

    /// Append a decoder to the end of the chain
    pub fn push_decoder(&mut self, decoder: Box<dyn SuspensionDecoder>) {
        self.decoders.push(decoder);
    }

    /// Parts of the real URL behind `raw`.
    ///
    /// Never fails: a payload no decoder can read resolves to the parts of
    /// `raw` itself.
    pub fn resolve(&self, raw: &str) -> UrlParts {
        self.resolve_nested(raw, 0)
    }

    fn resolve_nested(&self, raw: &str, depth: usize) -> UrlParts {
        let parts = UrlParts::parse(raw);
        if depth >= MAX_NESTING {
            return parts;
        }
        for decoder in &self.decoders {
            if let Some(inner) = decoder.try_decode(raw, &parts) {
                tracing::trace!("{} decoder unwrapped {}", decoder.name(), inner);
                return self.resolve_nested(&inner, depth + 1);
            }
        }
        parts
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve with the built-in decoder chain
pub fn resolve(raw: &str) -> UrlParts {
    DEFAULT_RESOLVER.resolve(raw)
}

/// Host of the real page behind a possibly suspended URL
pub fn resolved_host(raw: &str) -> String {
    resolve(raw).host
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

    #[test]
    fn test_plain_url_parts() {
        let parts = resolve("https://www.example.com:8080/a/b?q=1#frag");
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.host, "www.example.com:8080");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.fragment, "frag");
        assert_eq!(parts.full, "https://www.example.com:8080/a/b?q=1#frag");
    }

    #[test]
    fn test_default_port_is_dropped() {
        assert_eq!(resolve("https://example.com:443/").host, "example.com");
    }

    #[test]
    fn test_unparseable_input_keeps_raw() {
        let parts = resolve("not a url");
        assert_eq!(parts.full, "not a url");
        assert!(parts.host.is_empty());
    }

    #[test]
    fn test_extension_page_with_ttl() {
        let raw = "chrome-extension://abcdef/suspended.html#ttl=Rust&pos=0&uri=https://www.rust-lang.org/learn";
        let parts = resolve(raw);
        assert_eq!(parts.host, "www.rust-lang.org");
        assert_eq!(parts.path, "/learn");
    }

    #[test]
    fn test_extension_page_uri_only() {
        let parts = resolve("chrome-extension://abcdef/suspended.html#uri=https://docs.rs/regex");
        assert_eq!(parts.full, "https://docs.rs/regex");
    }

    #[test]
    fn test_extension_page_without_uri_stays_outer() {
        let raw = "chrome-extension://abcdef/suspended.html#ttl=Rust";
        let parts = resolve(raw);
        assert_eq!(parts.scheme, "chrome-extension");
        assert_eq!(parts.host, "abcdef");
    }

    #[test]
    fn test_other_extension_pages_are_not_decoded() {
        let parts = resolve("chrome-extension://abcdef/options.html#uri=https://docs.rs/");
        assert_eq!(parts.host, "abcdef");
    }

    #[test]
    fn test_data_page_is_decoded() {
        let markup = r#"<!DOCTYPE html><a href="https://example.org/x?a=1&amp;b=2">Title</a>"#;
        let raw = format!(
            "{}{}",
            SUSPENDED_URL_PREFIX,
            utf8_percent_encode(markup, NON_ALPHANUMERIC)
        );
        let parts = resolve(&raw);
        assert_eq!(parts.host, "example.org");
        assert_eq!(parts.full, "https://example.org/x?a=1&b=2");
    }

    #[test]
    fn test_malformed_data_page_falls_back_to_outer() {
        let raw = format!("{}%3Cp%3Eno%20anchor", SUSPENDED_URL_PREFIX);
        let parts = resolve(&raw);
        assert_eq!(parts.scheme, "data");
        assert!(parts.host.is_empty());
    }

    #[test]
    fn test_nested_suspensions_unwrap() {
        let inner = "chrome-extension://abcdef/suspended.html#uri=https://crates.io/";
        let markup = format!(r#"<a href="{}">x</a>"#, inner);
        let raw = format!(
            "{}{}",
            SUSPENDED_URL_PREFIX,
            utf8_percent_encode(&markup, NON_ALPHANUMERIC)
        );
        assert_eq!(resolved_host(&raw), "crates.io");
    }

    struct PrefixDecoder;

    impl SuspensionDecoder for PrefixDecoder {
        fn name(&self) -> &'static str {
            "prefix"
        }

        fn try_decode(&self, raw: &str, _parts: &UrlParts) -> Option<String> {
            raw.strip_prefix("sleep:").map(str::to_string)
        }
    }

    #[test]
    fn test_custom_decoder_chain() {
        let mut resolver = UrlResolver::new();
        resolver.push_decoder(Box::new(PrefixDecoder));
        assert_eq!(resolver.resolve("sleep:https://example.com/").host, "example.com");
        assert_eq!(UrlResolver::with_decoders(Vec::new()).resolve("sleep:x").host, "");
    }
}
