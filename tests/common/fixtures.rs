//! JSON fixtures shaped like the comment API's responses

use serde_json::{Value, json};

/// Submission every fixture comment belongs to
pub const LINK_ID: &str = "t3_thread";

/// A `t1` record under `parent_id`
pub fn comment(id: &str, parent_id: &str) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "name": format!("t1_{id}"),
            "parent_id": parent_id,
            "link_id": LINK_ID,
            "author": "fixture",
            "body": format!("comment {id}"),
            "score": 1,
            "created_utc": 1_700_000_000.0,
            "depth": 0,
            "replies": ""
        }
    })
}

/// A `more` record for `children` under `parent_id`
pub fn more(id: &str, parent_id: &str, children: &[&str]) -> Value {
    json!({
        "kind": "more",
        "data": {
            "count": children.len(),
            "name": format!("t1_{id}"),
            "id": id,
            "parent_id": parent_id,
            "depth": 0,
            "children": children
        }
    })
}

/// `api/morechildren` success body
pub fn morechildren(things: Vec<Value>) -> Value {
    json!({ "json": { "errors": [], "data": { "things": things } } })
}

/// `api/info` success body
pub fn info_listing(things: Vec<Value>) -> Value {
    json!({
        "kind": "Listing",
        "data": { "children": things, "after": null, "before": null }
    })
}

/// Top-level comments for every ID
pub fn top_level(ids: &[String]) -> Vec<Value> {
    ids.iter().map(|id| comment(id, LINK_ID)).collect()
}
