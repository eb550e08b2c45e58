//! Shallow and deep expansion of [`MoreChildren`] stubs.
//!
//! Both strategies walk the stub's children in capacity-bounded batches:
//!
//! - **Shallow** (`skip_replies = true`) uses the bulk lookup endpoint. The
//!   current batch and the remainder are requested concurrently and joined in
//!   order. Replies of the resolved comments are not loaded.
//! - **Deep** (`skip_replies = false`) uses the more-children endpoint, which
//!   returns one level of replies but accepts far fewer IDs. The server may
//!   answer part of a batch with a smaller stub; those sub-stubs are expanded
//!   one after another before moving on to the next batch. Every request in
//!   deep mode waits for the previous one.
//!
//! Any error aborts the whole expansion; no partial result is returned.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, trace};

use crate::client::ThreadClient;
use crate::config::ExpansionLimits;
use crate::error::Result;
use crate::tree::{build_replies_tree, extract_things, validate_api_response};
use crate::types::{COMMENT_PREFIX, Comment, ExpansionRequest, Thing};

use super::MoreChildren;
use super::batch::{is_terminal, next_id_slice};

/// Bulk lookup endpoint
pub(crate) const INFO_URI: &str = "api/info";

/// Deep expansion endpoint
pub(crate) const MORECHILDREN_URI: &str = "api/morechildren";

/// Expands stubs through a shared [`ThreadClient`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use comment_expander::{ClientConfig, ExpansionRequest, HttpClient, MoreChildren, MoreExpander};
///
/// # async fn example() -> comment_expander::Result<()> {
/// let config = ClientConfig::default();
/// let client = Arc::new(HttpClient::new(&config)?);
/// let expander = MoreExpander::new(client, config.limits);
///
/// let stub = MoreChildren::new("t3_abc", vec!["c1".into(), "c2".into()]);
/// let comments = expander.expand(&stub, ExpansionRequest::all()).await?;
/// # Ok(())
/// # }
/// ```
pub struct MoreExpander<C: ?Sized> {
    client: Arc<C>,
    limits: ExpansionLimits,
}

impl<C: ?Sized> Clone for MoreExpander<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            limits: self.limits,
        }
    }
}

impl<C> MoreExpander<C>
where
    C: ThreadClient + ?Sized,
{
    /// Create an expander over `client` with the given endpoint limits
    pub fn new(client: Arc<C>, limits: ExpansionLimits) -> Self {
        Self { client, limits }
    }

    /// The shared client handle
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Endpoint capacity limits in use
    pub fn limits(&self) -> ExpansionLimits {
        self.limits
    }

    /// Expand `stub` from its first child, shallow or deep per `request.skip_replies`
    pub async fn expand(
        &self,
        stub: &MoreChildren,
        request: ExpansionRequest,
    ) -> Result<Vec<Comment>> {
        self.expand_from(stub, request, 0).await
    }

    /// Expand `stub` starting at child `start_index`
    pub fn expand_from<'a>(
        &'a self,
        stub: &'a MoreChildren,
        request: ExpansionRequest,
        start_index: usize,
    ) -> BoxFuture<'a, Result<Vec<Comment>>> {
        if request.skip_replies {
            self.expand_shallow(stub, request, start_index)
        } else {
            self.expand_deep(stub, request, start_index)
        }
    }

    /// Resolve children through bulk lookup, without their replies.
    ///
    /// The lookup for this batch and the expansion of everything after it run
    /// concurrently; their results are concatenated in child order.
    pub fn expand_shallow<'a>(
        &'a self,
        stub: &'a MoreChildren,
        request: ExpansionRequest,
        start_index: usize,
    ) -> BoxFuture<'a, Result<Vec<Comment>>> {
        async move {
            if is_terminal(stub.children(), start_index, request.amount) {
                return Ok(Vec::new());
            }

            let ids = next_id_slice(
                stub.children(),
                start_index,
                request.amount,
                self.limits.bulk_lookup,
            );
            let fullnames = ids
                .iter()
                .map(|id| format!("{COMMENT_PREFIX}{id}"))
                .collect::<Vec<_>>()
                .join(",");
            debug!(
                parent_id = stub.parent_id(),
                start_index,
                batch_size = ids.len(),
                "Looking up comment batch"
            );

            let query = [("id", fullnames)];
            let next = request.with_amount(request.amount.saturating_sub(ids.len()));
            let (mut comments, rest) = futures::try_join!(
                self.client.fetch_listing(INFO_URI, &query),
                self.expand_shallow(stub, next, start_index + ids.len()),
            )?;

            comments.extend(rest);
            Ok(comments)
        }
        .boxed()
    }

    /// Resolve children with one level of replies.
    ///
    /// For each batch: fetch, rebuild the reply tree, expand every sub-stub the
    /// server substituted (in order, to exhaustion), then continue with the
    /// next batch. Output order is this batch's comments, then each sub-stub's
    /// comments, then the following batches.
    ///
    /// A sub-stub may cover IDs past the batch it replaced. Those IDs are left
    /// out of the following batches so every child is returned once.
    pub fn expand_deep<'a>(
        &'a self,
        stub: &'a MoreChildren,
        request: ExpansionRequest,
        start_index: usize,
    ) -> BoxFuture<'a, Result<Vec<Comment>>> {
        self.expand_deep_excluding(stub, request, start_index, HashSet::new())
    }

    fn expand_deep_excluding<'a>(
        &'a self,
        stub: &'a MoreChildren,
        request: ExpansionRequest,
        start_index: usize,
        mut resolved: HashSet<String>,
    ) -> BoxFuture<'a, Result<Vec<Comment>>> {
        async move {
            if is_terminal(stub.children(), start_index, request.amount) {
                return Ok(Vec::new());
            }

            let batch = next_id_slice(
                stub.children(),
                start_index,
                request.amount,
                self.limits.more_children,
            );
            let next_start = start_index + batch.len();
            let next = request.with_amount(request.amount.saturating_sub(batch.len()));

            let ids: Vec<&str> = batch
                .iter()
                .map(String::as_str)
                .filter(|id| !resolved.contains(*id))
                .collect();
            if ids.is_empty() {
                trace!(start_index, "Batch already resolved through a sub-stub");
                return self
                    .expand_deep_excluding(stub, next, next_start, resolved)
                    .await;
            }

            let anchor = stub.thread_anchor();
            debug!(
                link_id = anchor,
                start_index,
                batch_size = ids.len(),
                "Expanding comment batch with replies"
            );

            let query = [
                ("depth", "1".to_string()),
                ("sort", "old".to_string()),
                ("api_type", "json".to_string()),
                ("children", ids.join(",")),
                ("link_id", anchor.to_string()),
            ];
            let response = self.client.fetch_raw(MORECHILDREN_URI, &query).await?;
            validate_api_response(&response)?;
            let trees = build_replies_tree(extract_things(response)?);

            let mut comments = Vec::with_capacity(trees.len());
            let mut sub_stubs = Vec::new();
            for thing in trees {
                match thing {
                    Thing::Comment(comment) => comments.push(comment),
                    Thing::More(more) => sub_stubs.push(more.anchored_to(anchor)),
                }
            }

            if !sub_stubs.is_empty() {
                trace!(
                    link_id = anchor,
                    count = sub_stubs.len(),
                    "Server truncated batch, expanding sub-stubs"
                );
            }
            for sub_stub in &sub_stubs {
                let expanded = self
                    .expand_deep(sub_stub, ExpansionRequest::all(), 0)
                    .await?;
                resolved.extend(expanded.iter().map(|comment| comment.id.clone()));
                comments.extend(expanded);
            }

            let rest = self
                .expand_deep_excluding(stub, next, next_start, resolved)
                .await?;
            comments.extend(rest);
            Ok(comments)
        }
        .boxed()
    }
}
