//! Entry filters for the view pipeline.
//!
//! Three independent filters, combined with logical AND:
//! - [`TextFilter`]: pattern or substring match on name, extension and path
//! - [`CategoryFilter`]: folders only, or files of one [`FileCategory`]
//! - [`MinSize`]: size threshold with a binary unit multiplier

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::scanner::{Entry, FileCategory};

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    Substring(String),
}

/// Free-text search over an entry's name, extension and full path.
///
/// The query is tried as a case-insensitive regular expression first; if it
/// does not compile, it is matched as a case-insensitive substring instead.
#[derive(Debug, Clone)]
pub struct TextFilter {
    query: String,
    matcher: Matcher,
}

impl TextFilter {
    /// Build a filter from user input. Returns `None` for blank input.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(re) => Matcher::Pattern(re),
            Err(e) => {
                log::trace!("Search '{}' is not a pattern ({}), using substring", query, e);
                Matcher::Substring(query.to_lowercase())
            }
        };

        Some(Self {
            query: query.to_string(),
            matcher,
        })
    }

    /// The trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query compiled as a pattern.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        matches!(self.matcher, Matcher::Pattern(_))
    }

    /// Whether any of name, extension or path matches.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        let path = entry.path.to_string_lossy();
        let fields = [entry.name.as_str(), entry.extension.as_str(), path.as_ref()];

        match &self.matcher {
            Matcher::Pattern(re) => fields.iter().any(|f| re.is_match(f)),
            Matcher::Substring(needle) => fields
                .iter()
                .any(|f| f.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Category selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Directories only
    Folders,
    /// Non-directory entries of one category
    Only(FileCategory),
}

impl CategoryFilter {
    /// Whether `entry` passes this filter.
    #[must_use]
    pub fn matches(self, entry: &Entry) -> bool {
        match self {
            Self::All => true,
            Self::Folders => entry.is_dir,
            Self::Only(category) => entry.is_category(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "folders" => Ok(Self::Folders),
            other => other.parse().map(Self::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Folders => f.write_str("folders"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

/// Unit for the minimum-size threshold (binary multiples).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeUnit {
    /// Bytes
    B,
    /// 1024 bytes
    KB,
    /// 1024² bytes
    #[default]
    MB,
    /// 1024³ bytes
    GB,
}

impl SizeUnit {
    /// Bytes per unit.
    #[must_use]
    pub fn multiplier(self) -> u64 {
        match self {
            Self::B => 1,
            Self::KB => 1024,
            Self::MB => 1024 * 1024,
            Self::GB => 1024 * 1024 * 1024,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "B" => Ok(Self::B),
            "KB" => Ok(Self::KB),
            "MB" => Ok(Self::MB),
            "GB" => Ok(Self::GB),
            _ => Err(format!("Unknown size unit: '{s}'")),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::B => "B",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
        };
        f.write_str(s)
    }
}

/// An active minimum-size threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    value: f64,
    unit: SizeUnit,
}

impl MinSize {
    /// Create a threshold. NaN or non-positive values mean "no minimum";
    /// an infinite threshold hides every entry.
    #[must_use]
    pub fn new(value: f64, unit: SizeUnit) -> Option<Self> {
        if value > 0.0 {
            Some(Self { value, unit })
        } else {
            None
        }
    }

    /// Parse raw user input such as `"1.5"` or `"200abc"`.
    ///
    /// The leading number is used; input without one means "no minimum".
    #[must_use]
    pub fn parse(text: &str, unit: SizeUnit) -> Option<Self> {
        leading_number(text).and_then(|value| Self::new(value, unit))
    }

    /// Threshold in bytes (may be fractional).
    #[must_use]
    pub fn threshold_bytes(&self) -> f64 {
        self.value * self.unit.multiplier() as f64
    }

    /// Whether `entry` is at or above the threshold.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.size as f64 >= self.threshold_bytes()
    }
}

/// Parse the longest numeric prefix of `text`: optional sign, digits with at
/// most one dot, an optional exponent, or `Infinity`.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse().ok()
}

/// The full set of active filters.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Free-text search
    pub text: Option<TextFilter>,
    /// Category selection
    pub category: CategoryFilter,
    /// Minimum size
    pub min_size: Option<MinSize>,
}

impl ViewFilter {
    /// Set the search text (blank clears it).
    #[must_use]
    pub fn with_text(mut self, query: &str) -> Self {
        self.text = TextFilter::new(query);
        self
    }

    /// Set the category selection.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the minimum size.
    #[must_use]
    pub fn with_min_size(mut self, min_size: Option<MinSize>) -> Self {
        self.min_size = min_size;
        self
    }

    /// Whether no filter is active.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.text.is_none() && self.category == CategoryFilter::All && self.min_size.is_none()
    }

    /// Whether `entry` passes every active filter.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.text.as_ref().is_none_or(|t| t.matches(entry))
            && self.category.matches(entry)
            && self.min_size.is_none_or(|m| m.matches(entry))
    }
}
