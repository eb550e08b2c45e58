//! # comment-expander
//!
//! Expands the `more` stubs that comment APIs leave in large threads.
//!
//! When a thread has more replies than one response carries, the server sends a
//! placeholder listing the IDs of the comments it left out. This crate resolves
//! those placeholders back into comments with as few requests as the endpoint
//! limits allow:
//!
//! - **Shallow** expansion looks comments up in bulk (100 per request), without
//!   their replies. Batches are requested concurrently.
//! - **Deep** expansion fetches comments with one level of replies (20 per
//!   request). When the server answers a batch only in part and substitutes a
//!   smaller stub, that stub is expanded before moving on, so the result keeps
//!   thread order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use comment_expander::{ClientConfig, CommentListing, ExpansionRequest, HttpClient, MoreChildren, MoreExpander};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default();
//!     let expander = MoreExpander::new(Arc::new(HttpClient::new(&config)?), config.limits);
//!
//!     let stub = MoreChildren::new("t3_abc123", vec!["c1".into(), "c2".into()])
//!         .with_link_id("t3_abc123");
//!     let listing = CommentListing::with_more(Vec::new(), stub);
//!
//!     // Fetch the first comment with its replies, then the rest without
//!     let listing = listing.fetch_more(&expander, ExpansionRequest::new(1)).await?;
//!     let listing = listing.fetch_all(&expander, true).await?;
//!     for comment in &listing {
//!         println!("{}: {}", comment.author, comment.body);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP client and the transport seam
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Comment listings
pub mod listing;
/// `more` stubs and the expansion engine
pub mod more;
/// Response validation and reply-tree building
pub mod tree;
/// Core types
pub mod types;

#[allow(clippy::unwrap_used, clippy::expect_used, dead_code)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use client::{HttpClient, ThreadClient};
pub use config::{
    ClientConfig, ExpansionLimits, MAX_API_INFO_AMOUNT, MAX_API_MORECHILDREN_AMOUNT,
};
pub use error::{ApiError, ApiErrorDetail, Error, Result};
pub use listing::CommentListing;
pub use more::{EMPTY_CHILDREN, MoreChildren, MoreExpander, next_id_slice};
pub use tree::{add_empty_replies, build_replies_tree, validate_api_response};
pub use types::{Amount, Comment, ExpansionRequest, Listing, ListingData, Thing};
