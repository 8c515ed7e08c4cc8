//! Keep-N retention policy.
//!
//! Given tags already filtered and sorted ascending, the newest `keep` tags
//! (the tail) survive and everything before them is scheduled for deletion.

use crate::error::{NexusError, Result};
use serde::Serialize;


/// The split of a sorted tag list into deleted and kept tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionPlan {
    /// Tags to delete, oldest first
    pub to_delete: Vec<String>,
    /// Tags that survive the policy
    pub to_keep: Vec<String>,
    /// Requested number of tags to keep
    pub keep: usize,
}

impl RetentionPlan {
    /// True when fewer tags exist than the policy asked to keep.
    ///
    /// Nothing is deleted in that case; callers report it as information.
    pub fn is_short(&self) -> bool {
        self.to_keep.len() < self.keep
    }

    /// Number of tags the policy considered.
    pub fn available(&self) -> usize {
        self.to_delete.len() + self.to_keep.len()
    }
}

/// Splits ascending-sorted `tags` so that the last `keep` survive.
///
/// # Examples
///
/// ```
/// use libnexus::retention::select_for_deletion;
///
/// let tags = vec!["v1".to_string(), "v2".to_string(), "v3".to_string()];
/// let plan = select_for_deletion(&tags, 1);
/// assert_eq!(plan.to_delete, ["v1", "v2"]);
/// assert_eq!(plan.to_keep, ["v3"]);
/// ```
pub fn select_for_deletion(tags: &[String], keep: usize) -> RetentionPlan {
    if tags.len() < keep {
        tracing::info!(available = tags.len(), keep, "fewer tags than keep count");
        return RetentionPlan {
            to_delete: Vec::new(),
            to_keep: tags.to_vec(),
            keep,
        };
    }

    let (to_delete, to_keep) = tags.split_at(tags.len() - keep);
    RetentionPlan {
        to_delete: to_delete.to_vec(),
        to_keep: to_keep.to_vec(),
        keep,
    }
}

/// What a delete invocation asks for, before any registry call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteRequest {
    /// A specific tag to delete; bypasses filtering and retention
    pub tag: Option<String>,
    /// Number of newest tags to keep, if given
    pub keep: Option<usize>,
    /// Raw filter expressions
    pub expressions: Vec<String>,
}

/// How a validated delete request selects tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteMode {
    /// Delete exactly this tag.
    Single(String),
    /// Filter, sort, and keep the newest `keep` tags.
    Retention { keep: usize, keep_explicit: bool },
}

impl DeleteRequest {
    /// Checks that the request names enough criteria to select tags.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::Usage`] when neither a tag, a keep count nor a
    /// filter expression was supplied: deleting every tag is never a default.
    pub fn validate(&self) -> Result<DeleteMode> {
        if let Some(tag) = &self.tag {
            return Ok(DeleteMode::Single(tag.clone()));
        }

        if self.keep.is_none() && self.expressions.is_empty() {
            return Err(NexusError::usage(
                "You should either specify a tag or filter expressions, \
                 or specify how many images you want to keep",
            ));
        }

        Ok(DeleteMode::Retention {
            keep: self.keep.unwrap_or(0),
            keep_explicit: self.keep.is_some(),
        })
    }
}

/// Rejects an empty selection unless a keep count was given explicitly.
pub fn ensure_selected(image: &str, filtered: &[String], keep_explicit: bool) -> Result<()> {
    if filtered.is_empty() && !keep_explicit {
        return Err(NexusError::NothingSelected {
            image: image.to_string(),
        });
    }
    Ok(())
}
