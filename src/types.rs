//! Core types for comment-expander

use serde::{Deserialize, Serialize};

use crate::listing::CommentListing;
use crate::more::MoreChildren;

/// Fullname prefix of comment things (`t1_<id>`)
pub const COMMENT_PREFIX: &str = "t1_";

/// A resolved comment record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Base-36 comment ID, without the kind prefix
    pub id: String,

    /// Fullname (`t1_<id>`)
    #[serde(default)]
    pub name: String,

    /// Fullname of the parent comment or submission
    #[serde(default)]
    pub parent_id: String,

    /// Fullname of the submission the comment belongs to
    #[serde(default)]
    pub link_id: String,

    /// Author username (`[deleted]` for removed accounts)
    #[serde(default)]
    pub author: String,

    /// Markdown body
    #[serde(default)]
    pub body: String,

    /// Net score
    #[serde(default)]
    pub score: i64,

    /// Creation time as a UNIX timestamp
    #[serde(default)]
    pub created_utc: f64,

    /// Nesting depth within the thread
    #[serde(default)]
    pub depth: u32,

    /// Loaded replies plus the stub for the ones that were not loaded
    #[serde(default)]
    pub replies: CommentListing,
}

impl Comment {
    /// Fullname of this comment, derived from the ID when the server omitted it
    pub fn fullname(&self) -> String {
        if self.name.is_empty() {
            format!("{COMMENT_PREFIX}{}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// A record of a comment thread: either a loaded comment or a stub for unloaded ones
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    /// A resolved comment (`t1`)
    #[serde(rename = "t1")]
    Comment(Comment),

    /// A placeholder for comments the server did not send (`more`)
    #[serde(rename = "more")]
    More(MoreChildren),
}

impl Thing {
    /// Fullname used by other records' `parent_id` to refer to this one
    pub fn fullname(&self) -> String {
        match self {
            Thing::Comment(comment) => comment.fullname(),
            Thing::More(more) => more.name.clone(),
        }
    }

    /// Fullname of the record this one hangs under
    pub fn parent_id(&self) -> &str {
        match self {
            Thing::Comment(comment) => &comment.parent_id,
            Thing::More(more) => more.parent_id(),
        }
    }
}

/// Generic `{ "kind": "Listing", "data": { ... } }` envelope
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listing<T> {
    /// Always "Listing"
    #[serde(default = "listing_kind")]
    pub kind: String,

    /// Listing payload
    pub data: ListingData<T>,
}

/// Payload of a [`Listing`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListingData<T> {
    /// Records in server order
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,

    /// Pagination cursor for the next page
    #[serde(default)]
    pub after: Option<String>,

    /// Pagination cursor for the previous page
    #[serde(default)]
    pub before: Option<String>,
}

impl<T> Listing<T> {
    /// Wrap records in a listing envelope with no pagination cursors
    pub fn new(children: Vec<T>) -> Self {
        Self {
            kind: listing_kind(),
            data: ListingData {
                children,
                after: None,
                before: None,
            },
        }
    }
}

fn listing_kind() -> String {
    "Listing".to_string()
}

/// How many of a stub's children to resolve in one call
///
/// Negative, zero and NaN inputs all collapse to `Limited(0)`, which ends an
/// expansion without touching the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Amount {
    /// At most this many original child IDs
    Limited(usize),
    /// Every remaining child ID
    #[default]
    Unbounded,
}

impl Amount {
    /// Amount from a signed count; anything `<= 0` is exhausted
    pub fn from_i64(n: i64) -> Self {
        if n <= 0 {
            Amount::Limited(0)
        } else {
            Amount::Limited(usize::try_from(n).unwrap_or(usize::MAX))
        }
    }

    /// Amount from a float; fractions round down and `+inf` means unbounded
    pub fn from_f64(n: f64) -> Self {
        if n.is_nan() || n <= 0.0 {
            Amount::Limited(0)
        } else if n.is_infinite() {
            Amount::Unbounded
        } else {
            Amount::Limited(n.floor() as usize)
        }
    }

    /// True when nothing is left to resolve
    pub fn is_exhausted(self) -> bool {
        matches!(self, Amount::Limited(0))
    }

    /// Size of the next batch given an endpoint capacity limit
    pub fn cap(self, limit: usize) -> usize {
        match self {
            Amount::Limited(n) => n.min(limit),
            Amount::Unbounded => limit,
        }
    }

    /// Amount left after resolving `n` items
    pub fn saturating_sub(self, n: usize) -> Self {
        match self {
            Amount::Limited(remaining) => Amount::Limited(remaining.saturating_sub(n)),
            Amount::Unbounded => Amount::Unbounded,
        }
    }
}

impl From<usize> for Amount {
    fn from(n: usize) -> Self {
        Amount::Limited(n)
    }
}

/// Options for one expansion call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionRequest {
    /// Cap on original child IDs to resolve (sub-stub items are not counted)
    pub amount: Amount,
    /// Resolve items without replies via bulk lookup
    pub skip_replies: bool,
}

impl ExpansionRequest {
    /// Deep expansion of up to `amount` children
    pub fn new(amount: impl Into<Amount>) -> Self {
        Self {
            amount: amount.into(),
            skip_replies: false,
        }
    }

    /// Deep expansion of every child
    pub fn all() -> Self {
        Self::default()
    }

    /// Select shallow (`true`) or deep (`false`) expansion
    pub fn skip_replies(mut self, skip: bool) -> Self {
        self.skip_replies = skip;
        self
    }

    /// Same options with a different amount
    pub(crate) fn with_amount(self, amount: Amount) -> Self {
        Self { amount, ..self }
    }
}
