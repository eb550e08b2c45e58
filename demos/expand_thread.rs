//! Expand a `more` stub example
//!
//! This example demonstrates:
//! - Building an HTTP client from configuration
//! - Expanding a stub with replies (deep) and without (shallow)
//! - Paging through a comment listing
//!
//! Usage: `cargo run --example expand_thread -- <link_id> <comment_id>...`

use std::sync::Arc;

use comment_expander::{
    ClientConfig, CommentListing, ExpansionRequest, HttpClient, MoreChildren, MoreExpander,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let link_id = args.next().unwrap_or_else(|| "t3_example".to_string());
    let children: Vec<String> = args.collect();

    let config = ClientConfig {
        base_url: "https://www.reddit.com".to_string(),
        ..Default::default()
    };
    let client = Arc::new(HttpClient::new(&config)?);
    let expander = MoreExpander::new(client, config.limits);

    let stub = MoreChildren::new(link_id.clone(), children).with_link_id(link_id);
    let listing = CommentListing::with_more(Vec::new(), stub);

    // First comment with its replies
    let listing = listing
        .fetch_more(&expander, ExpansionRequest::new(1))
        .await?;
    if let Some(first) = listing.items.first() {
        println!(
            "{} ({} replies loaded, {} pending)",
            first.author,
            first.replies.len(),
            first.replies.more.children().len()
        );
    }

    // Everything else, without replies
    let listing = listing.fetch_all(&expander, true).await?;
    for comment in &listing {
        println!("- {} [{}]: {}", comment.author, comment.score, comment.body);
    }

    Ok(())
}
