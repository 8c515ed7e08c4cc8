//! Tag ordering strategies.
//!
//! Tags are sorted ascending so that the oldest candidates come first and the
//! newest tags end up at the tail, where the retention selector keeps them.

use crate::error::{NexusError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;


/// Tag that always sorts last under the semantic-version strategy.
pub const LATEST_TAG: &str = "latest";

/// How tags are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStrategy {
    /// Compare the first run of digits found in each tag.
    #[default]
    Numeric,
    /// Compare tags as semantic versions, with `latest` pinned last.
    Semver,
}

impl From<&str> for ComparisonStrategy {
    /// Anything other than `"semver"` selects the numeric strategy.
    fn from(s: &str) -> Self {
        if s == "semver" {
            ComparisonStrategy::Semver
        } else {
            ComparisonStrategy::Numeric
        }
    }
}

impl fmt::Display for ComparisonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonStrategy::Numeric => f.write_str("default"),
            ComparisonStrategy::Semver => f.write_str("semver"),
        }
    }
}

impl ComparisonStrategy {
    /// Compares two tags under this strategy.
    ///
    /// # Errors
    ///
    /// Under [`ComparisonStrategy::Semver`], returns
    /// [`NexusError::InvalidVersion`] if either tag (other than `latest`) is
    /// not a semantic version.
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        let invalid = |tag: String| NexusError::InvalidVersion { tags: vec![tag] };
        let a = SortKey::new(*self, a).map_err(invalid)?;
        let b = SortKey::new(*self, b).map_err(invalid)?;
        Ok(a.cmp(&b))
    }

    /// Strict less-than predicate, the form a sort comparator takes.
    pub fn less(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }
}

/// Sorts `tags` ascending under `strategy`, keeping ties in input order.
///
/// Every tag is checked before anything is reordered: under the semver
/// strategy a single unparsable tag fails the whole sort and `tags` is left
/// untouched.
///
/// # Examples
///
/// ```
/// use libnexus::sort::{sort_tags, ComparisonStrategy};
///
/// let mut tags = vec!["1.3.0".to_string(), "latest".to_string(), "1.2.0".to_string()];
/// sort_tags(&mut tags, ComparisonStrategy::Semver).unwrap();
/// assert_eq!(tags, ["1.2.0", "1.3.0", "latest"]);
/// ```
pub fn sort_tags(tags: &mut Vec<String>, strategy: ComparisonStrategy) -> Result<()> {
    let mut invalid = Vec::new();
    let mut keyed = Vec::with_capacity(tags.len());

    for tag in tags.iter() {
        match SortKey::new(strategy, tag) {
            Ok(key) => keyed.push(key),
            Err(tag) => invalid.push(tag),
        }
    }

    if !invalid.is_empty() {
        return Err(NexusError::InvalidVersion { tags: invalid });
    }

    let mut order: Vec<usize> = (0..tags.len()).collect();
    // stable: equal keys keep input order
    order.sort_by(|&i, &j| keyed[i].cmp(&keyed[j]));
    drop(keyed);

    let mut taken: Vec<Option<String>> = tags.drain(..).map(Some).collect();
    tags.extend(order.into_iter().filter_map(|i| taken[i].take()));

    tracing::debug!(%strategy, count = tags.len(), "sorted tags");
    Ok(())
}

/// Returns the first maximal run of ASCII digits in `tag`, if any.
///
/// # Examples
///
/// ```
/// use libnexus::sort::first_digit_run;
///
/// assert_eq!(first_digit_run("build-042-rc7"), Some("042"));
/// assert_eq!(first_digit_run("latest"), None);
/// ```
pub fn first_digit_run(tag: &str) -> Option<&str> {
    let start = tag.find(|c: char| c.is_ascii_digit())?;
    let rest = &tag[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Integer value of a digit run, compared exactly regardless of length.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumericKey<'a>(&'a str);

impl<'a> NumericKey<'a> {
    fn new(tag: &'a str) -> Self {
        // no digits reads as zero, which is the empty significant part
        let digits = first_digit_run(tag).unwrap_or("");
        NumericKey(digits.trim_start_matches('0'))
    }
}

impl Ord for NumericKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for NumericKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SortKey<'a> {
    Numeric(NumericKey<'a>),
    Version(Version),
    Latest,
}

impl<'a> SortKey<'a> {
    /// Builds the key for `tag`; the error carries the tag that failed to parse.
    fn new(strategy: ComparisonStrategy, tag: &'a str) -> std::result::Result<Self, String> {
        match strategy {
            ComparisonStrategy::Numeric => Ok(SortKey::Numeric(NumericKey::new(tag))),
            ComparisonStrategy::Semver if tag == LATEST_TAG => Ok(SortKey::Latest),
            ComparisonStrategy::Semver => Version::from_str(tag)
                .map(SortKey::Version)
                .map_err(|e| {
                    tracing::warn!(tag, error = %e, "tag is not a semantic version");
                    tag.to_string()
                }),
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Latest, SortKey::Latest) => Ordering::Equal,
            (SortKey::Latest, _) => Ordering::Greater,
            (_, SortKey::Latest) => Ordering::Less,
            (SortKey::Version(a), SortKey::Version(b)) => version_precedence(a, b),
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.cmp(b),
            // keys of one sort always share a strategy
            (SortKey::Numeric(_), SortKey::Version(_)) => Ordering::Less,
            (SortKey::Version(_), SortKey::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Semantic-version precedence: build metadata does not take part.
fn version_precedence(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then_with(|| a.minor.cmp(&b.minor))
        .then_with(|| a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}
