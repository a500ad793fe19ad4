//! Match Engine
//!
//! Decides whether a tab satisfies a search keyword. A keyword is parsed
//! once into a [`SearchQuery`]:
//! - `<prefix>de...` selects tabs with German titles
//! - `<prefix>au...` selects tabs playing sound
//! - anything else is a smartcase pattern searched in the title: it is
//!   case-sensitive only when it contains an uppercase letter. Keywords
//!   that do not compile, even once escaped, are searched as plain text.

use crate::language;
use regex::{Regex, RegexBuilder};
use tab_organizer_core::Tab;
use tracing::debug;

/// Upper bound on the compiled size of a keyword pattern
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A parsed search keyword
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Title pattern, already compiled with smartcase applied
    Plain(Regex),
    /// Plain text searched in the title
    Literal {
        /// Lowercased unless `case_sensitive`
        needle: String,
        case_sensitive: bool,
    },
    /// Titles the language heuristic considers German
    Language,
    /// Tabs currently playing sound
    Audible,
}

impl SearchQuery {
    /// Parse a raw keyword.
    ///
    /// The keyword is a regular expression fragment; one that does not
    /// compile is searched for literally.
    pub fn parse(keyword: &str, command_prefix: &str) -> Self {
        Self::parse_with_limit(keyword, command_prefix, PATTERN_SIZE_LIMIT)
    }

    /// [`Self::parse`] with an explicit bound on the compiled pattern size
    pub fn parse_with_limit(keyword: &str, command_prefix: &str, size_limit: usize) -> Self {
        if !command_prefix.is_empty() {
            if let Some(command) = keyword.strip_prefix(command_prefix) {
                if command.starts_with("de") {
                    return Self::Language;
                }
                if command.starts_with("au") {
                    return Self::Audible;
                }
            }
        }

        let case_sensitive = keyword.chars().any(char::is_uppercase);
        let compile = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(!case_sensitive)
                .size_limit(size_limit)
                .build()
        };
        let compiled = compile(keyword).or_else(|e| {
            debug!("Keyword {:?} is not a valid pattern ({}), matching literally", keyword, e);
            compile(&regex::escape(keyword))
        });
        match compiled {
            Ok(pattern) => Self::Plain(pattern),
            Err(e) => {
                debug!("Keyword of {} bytes is too large to compile ({})", keyword.len(), e);
                let needle = if case_sensitive {
                    keyword.to_string()
                } else {
                    keyword.to_lowercase()
                };
                Self::Literal { needle, case_sensitive }
            }
        }
    }

    /// Whether the tab satisfies this query
    pub fn matches(&self, tab: &Tab) -> bool {
        match self {
            Self::Plain(pattern) => pattern.is_match(&tab.title),
            Self::Literal { needle, case_sensitive: true } => tab.title.contains(needle.as_str()),
            Self::Literal { needle, case_sensitive: false } => {
                tab.title.to_lowercase().contains(needle.as_str())
            }
            Self::Language => language::is_german(&tab.title),
            Self::Audible => tab.audible,
        }
    }
}

/// Parse `keyword` and test a single tab
pub fn matches(keyword: &str, command_prefix: &str, tab: &Tab) -> bool {
    SearchQuery::parse(keyword, command_prefix).matches(tab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tab_organizer_core::{TabId, WindowId};

    fn tab(title: &str) -> Tab {
        Tab::new(TabId(1), WindowId(1), "https://example.com/", title)
    }

    #[test]
    fn test_language_command() {
        assert!(matches(":de", ":", &tab("Ich gehe zur Schule")));
        assert!(!matches(":de", ":", &tab("I go to school")));
        assert!(matches(":deutsch", ":", &tab("Die Zeit")));
    }

    #[test]
    fn test_audible_command() {
        let mut playing = tab("Music");
        playing.audible = true;
        assert!(matches(":au", ":", &playing));
        assert!(!matches(":au", ":", &tab("Music")));
    }

    #[test]
    fn test_smartcase() {
        assert!(matches("Foo", ":", &tab("Foo bar")));
        assert!(!matches("Foo", ":", &tab("foo bar")));
        assert!(matches("foo", ":", &tab("Foo bar")));
        assert!(matches("foo", ":", &tab("foo bar")));
    }

    #[test]
    fn test_pattern_fragments() {
        assert!(matches("ru.t", ":", &tab("The Rust Book")));
        assert!(matches("^the", ":", &tab("The Rust Book")));
        assert!(!matches("^rust", ":", &tab("The Rust Book")));
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        assert!(matches("c++ (", ":", &tab("Learning C++ (2nd edition)")));
        assert!(!matches("c++ (", ":", &tab("Learning C")));
    }

    #[test]
    fn test_oversized_keyword_falls_back_to_text_search() {
        let keyword = format!("{}(", "abc".repeat(40));
        let query = SearchQuery::parse_with_limit(&keyword, ":", 16);
        assert!(matches!(query, SearchQuery::Literal { case_sensitive: false, .. }));
        assert!(query.matches(&tab(&format!("Notes: {}(", "ABC".repeat(40)))));
        assert!(!query.matches(&tab("abc")));

        let query = SearchQuery::parse_with_limit("Rust", ":", 1);
        assert!(query.matches(&tab("The Rust Book")));
        assert!(!query.matches(&tab("the rust book")));
    }

    #[test]
    fn test_long_keyword_never_panics() {
        let keyword = "(a|b)".repeat(20_000);
        assert!(!matches(&keyword, ":", &tab("The Rust Book")));
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        assert!(matches("", ":", &tab("anything")));
        assert!(matches("", ":", &tab("")));
    }

    #[test]
    fn test_unknown_command_is_a_pattern() {
        assert!(matches(":x", ":", &tab("a:x")));
        assert!(matches!(SearchQuery::parse(":au", ""), SearchQuery::Plain(_)));
    }
}
