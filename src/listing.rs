//! Comment listings: loaded comments plus the stub for the rest.
//!
//! On the wire a comment's replies are either `""` (none) or a `Listing` whose
//! children are comments optionally followed by one `more` record. The stub is
//! kept apart from the loaded items, so iterating a listing only ever yields
//! [`Comment`] values.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::ThreadClient;
use crate::error::Result;
use crate::more::{EMPTY_CHILDREN, MoreChildren, MoreExpander};
use crate::types::{Amount, Comment, ExpansionRequest, Listing, Thing};

/// Loaded comments followed by a stub for the comments not yet fetched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentListing {
    /// Comments loaded so far, in thread order
    pub items: Vec<Comment>,
    /// Comments known to exist but not fetched yet
    pub more: MoreChildren,
}

impl CommentListing {
    /// Listing of `items` with nothing left to fetch
    pub fn new(items: Vec<Comment>) -> Self {
        Self {
            items,
            more: EMPTY_CHILDREN.clone(),
        }
    }

    /// Listing of `items` followed by the comments behind `more`
    pub fn with_more(items: Vec<Comment>, more: MoreChildren) -> Self {
        Self { items, more }
    }

    /// True when every comment has been fetched
    pub fn is_finished(&self) -> bool {
        self.more.is_empty()
    }

    /// Number of loaded comments
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no comment is loaded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over loaded comments
    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.items.iter()
    }

    /// Fetch up to `request.amount` more comments.
    ///
    /// Returns a new listing holding the current items followed by the fetched
    /// ones, and a stub trimmed to the children that were not requested. `self`
    /// is left untouched.
    pub async fn fetch_more<C>(
        &self,
        expander: &MoreExpander<C>,
        request: ExpansionRequest,
    ) -> Result<CommentListing>
    where
        C: ThreadClient + ?Sized,
    {
        if self.is_finished() || request.amount.is_exhausted() {
            return Ok(self.clone());
        }

        let fetched = expander.expand(&self.more, request).await?;
        let consumed = request.amount.cap(self.more.children().len());

        let mut items = Vec::with_capacity(self.items.len() + fetched.len());
        items.extend(self.items.iter().cloned());
        items.extend(fetched);
        Ok(CommentListing {
            items,
            more: self.more.remaining_after(consumed),
        })
    }

    /// Fetch every remaining comment
    pub async fn fetch_all<C>(
        &self,
        expander: &MoreExpander<C>,
        skip_replies: bool,
    ) -> Result<CommentListing>
    where
        C: ThreadClient + ?Sized,
    {
        let request = ExpansionRequest {
            amount: Amount::Unbounded,
            skip_replies,
        };
        self.fetch_more(expander, request).await
    }
}

impl<'a> IntoIterator for &'a CommentListing {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Listing<Thing>> for CommentListing {
    fn from(listing: Listing<Thing>) -> Self {
        let mut items = Vec::with_capacity(listing.data.children.len());
        let mut more: Option<MoreChildren> = None;
        for thing in listing.data.children {
            match thing {
                Thing::Comment(comment) => items.push(comment),
                Thing::More(stub) => {
                    if more.is_some() {
                        warn!(
                            name = %stub.name,
                            "Listing carries more than one stub, keeping the last"
                        );
                    }
                    more = Some(stub);
                }
            }
        }
        Self {
            items,
            more: more.unwrap_or_default(),
        }
    }
}

impl Serialize for CommentListing {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.items.is_empty() && self.is_finished() {
            return serializer.serialize_str("");
        }
        let mut children: Vec<Thing> = self.items.iter().cloned().map(Thing::Comment).collect();
        if !self.is_finished() {
            children.push(Thing::More(self.more.clone()));
        }
        Listing::new(children).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CommentListing {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Replies {
            Listing(Listing<Thing>),
            Marker(String),
            Null(()),
        }

        match Replies::deserialize(deserializer)? {
            Replies::Listing(listing) => Ok(listing.into()),
            Replies::Marker(marker) if marker.is_empty() => Ok(Self::default()),
            Replies::Marker(marker) => Err(de::Error::custom(format!(
                "unexpected replies marker '{marker}'"
            ))),
            Replies::Null(()) => Ok(Self::default()),
        }
    }
}
