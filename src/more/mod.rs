//! Stubs for unloaded comments and the engine that expands them.
//!
//! When a thread has more replies than one response carries, the server emits a
//! `more` record listing the IDs of the comments it left out. [`MoreChildren`]
//! models that record; [`MoreExpander`] turns it back into comments.
//!
//! Split into focused submodules:
//! - [`batch`] - Capacity-bounded slicing of child IDs
//! - [`expand`] - Shallow (bulk lookup) and deep (with replies) expansion

mod batch;
mod expand;


pub use batch::next_id_slice;
pub use expand::MoreExpander;

use serde::{Deserialize, Serialize};

use crate::client::ThreadClient;
use crate::error::Result;
use crate::types::{Comment, ExpansionRequest};

/// Shared stub with no children, used wherever nothing is left to expand
pub static EMPTY_CHILDREN: MoreChildren = MoreChildren::EMPTY;

/// A `more` record: known but unfetched children at one position of a thread.
///
/// The child ID list is fixed at construction. Anything that needs a different
/// list or anchor builds a new stub through [`MoreChildren::anchored_to`] or
/// [`MoreChildren::remaining_after`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreChildren {
    /// Number of comments the stub stands for, as reported by the server
    #[serde(default)]
    pub count: u64,

    /// Fullname of the stub itself
    #[serde(default)]
    pub name: String,

    /// ID of the stub itself
    #[serde(default)]
    pub id: String,

    /// Nesting depth of the stub
    #[serde(default)]
    pub depth: u32,

    #[serde(default)]
    parent_id: String,

    #[serde(default)]
    children: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_id: Option<String>,
}

impl MoreChildren {
    const EMPTY: MoreChildren = MoreChildren {
        count: 0,
        name: String::new(),
        id: String::new(),
        depth: 0,
        parent_id: String::new(),
        children: Vec::new(),
        link_id: None,
    };

    /// Create a stub for `children` hanging under `parent_id`
    pub fn new(parent_id: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            count: children.len() as u64,
            parent_id: parent_id.into(),
            children,
            ..Self::EMPTY
        }
    }

    /// Set the submission fullname the stub belongs to
    pub fn with_link_id(mut self, link_id: impl Into<String>) -> Self {
        self.link_id = Some(link_id.into());
        self
    }

    /// Child IDs, in thread order
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Fullname of the record the stub hangs under
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Submission fullname, if known
    pub fn link_id(&self) -> Option<&str> {
        self.link_id.as_deref()
    }

    /// Identifier tying the stub to its thread: `link_id`, else `parent_id`
    pub fn thread_anchor(&self) -> &str {
        self.link_id.as_deref().unwrap_or(&self.parent_id)
    }

    /// True when there is nothing left to expand
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Copy of this stub bound to the thread identified by `link_id`.
    ///
    /// Copies the declared fields only; the source stub is left as is.
    pub fn anchored_to(&self, link_id: &str) -> Self {
        self.with_parts(
            self.count,
            self.children.clone(),
            Some(link_id.to_string()),
        )
    }

    /// Stub for the children left after the first `consumed` were fetched.
    ///
    /// Returns the empty stub once every child has been consumed.
    pub fn remaining_after(&self, consumed: usize) -> Self {
        if consumed >= self.children.len() {
            return EMPTY_CHILDREN.clone();
        }
        self.with_parts(
            self.count.saturating_sub(consumed as u64),
            self.children[consumed..].to_vec(),
            self.link_id.clone(),
        )
    }

    // Every declared field is listed here; derived stubs go through this.
    fn with_parts(&self, count: u64, children: Vec<String>, link_id: Option<String>) -> Self {
        Self {
            count,
            name: self.name.clone(),
            id: self.id.clone(),
            depth: self.depth,
            parent_id: self.parent_id.clone(),
            children,
            link_id,
        }
    }

    /// Expand this stub with `expander`.
    ///
    /// Shorthand for [`MoreExpander::expand`].
    pub async fn fetch_more<C>(
        &self,
        expander: &MoreExpander<C>,
        request: ExpansionRequest,
    ) -> Result<Vec<Comment>>
    where
        C: ThreadClient + ?Sized,
    {
        expander.expand(self, request).await
    }
}

impl Default for MoreChildren {
    fn default() -> Self {
        Self::EMPTY
    }
}
