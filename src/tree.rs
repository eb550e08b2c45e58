//! Response validation and reply-tree reconstruction for `api/morechildren`.
//!
//! The endpoint answers with a flat list of records in thread order. Each record
//! names its parent by fullname; [`build_replies_tree`] nests records under the
//! parents present in the same response and returns the rest.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{ApiError, ApiErrorDetail, Error, Result};
use crate::types::Thing;

/// Fail when the response's error channel is populated or its envelope is malformed.
///
/// Expected shape: `{ "json": { "errors": [...], "data": { ... } } }`. A missing
/// `errors` key counts as no errors.
pub fn validate_api_response(response: &Value) -> Result<()> {
    let json = response
        .get("json")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::MalformedEnvelope("missing 'json' object".to_string()))?;

    let errors = match json.get("errors") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(errors)) => errors,
        Some(other) => {
            return Err(ApiError::MalformedEnvelope(format!(
                "'errors' is not an array: {other}"
            ))
            .into());
        }
    };

    if errors.is_empty() {
        return Ok(());
    }

    let details = errors
        .iter()
        .map(|entry| {
            ApiErrorDetail::from_value(entry).unwrap_or_else(|| ApiErrorDetail {
                code: "UNKNOWN".to_string(),
                message: entry.to_string(),
                field: None,
            })
        })
        .collect();
    Err(ApiError::Rejected(details).into())
}

/// Take `json.data.things` out of a validated response and decode each record.
///
/// Every record is stamped with empty replies before decoding.
pub fn extract_things(response: Value) -> Result<Vec<Thing>> {
    let Value::Object(mut root) = response else {
        return Err(ApiError::MalformedEnvelope("response is not an object".to_string()).into());
    };
    let things = root
        .remove("json")
        .and_then(|mut json| json.get_mut("data")?.get_mut("things").map(Value::take))
        .ok_or_else(|| ApiError::MalformedEnvelope("missing 'json.data.things'".to_string()))?;

    let Value::Array(records) = things else {
        return Err(ApiError::MalformedEnvelope("'things' is not an array".to_string()).into());
    };

    records
        .into_iter()
        .map(|record| {
            serde_json::from_value::<Thing>(add_empty_replies(record)).map_err(Error::from)
        })
        .collect()
}

/// Give a flat comment record an empty replies container.
///
/// Records of other kinds are returned unchanged.
pub fn add_empty_replies(mut record: Value) -> Value {
    if record.get("kind").and_then(Value::as_str) == Some("t1")
        && let Some(data) = record.get_mut("data").and_then(Value::as_object_mut)
    {
        data.insert("replies".to_string(), Value::String(String::new()));
    }
    record
}

/// Nest records under their parents when the parent is in the same list.
///
/// Comments are appended to the parent's `replies.items`; a stub becomes the
/// parent's `replies.more`, anchored to the parent's submission. Records whose
/// parent is not in the list are returned in their original order.
pub fn build_replies_tree(records: Vec<Thing>) -> Vec<Thing> {
    let index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .filter(|(_, thing)| matches!(thing, Thing::Comment(_)))
        .map(|(i, thing)| (thing.fullname(), i))
        .collect();

    let mut kids: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, thing) in records.iter().enumerate() {
        match index.get(thing.parent_id()) {
            Some(&parent) if parent != i => kids[parent].push(i),
            _ => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Thing>> = records.into_iter().map(Some).collect();
    let tree: Vec<Thing> = roots
        .into_iter()
        .filter_map(|i| assemble(i, &mut slots, &kids))
        .collect();

    let orphaned = slots.iter().filter(|slot| slot.is_some()).count();
    if orphaned > 0 {
        warn!(orphaned, "Dropping records with cyclic parent references");
    }
    tree
}

fn assemble(i: usize, slots: &mut [Option<Thing>], kids: &[Vec<usize>]) -> Option<Thing> {
    let mut thing = slots[i].take()?;
    if let Thing::Comment(parent) = &mut thing {
        for &kid in &kids[i] {
            match assemble(kid, slots, kids) {
                Some(Thing::Comment(reply)) => parent.replies.items.push(reply),
                Some(Thing::More(more)) => {
                    parent.replies.more = if parent.link_id.is_empty() {
                        more
                    } else {
                        more.anchored_to(&parent.link_id)
                    };
                }
                None => {}
            }
        }
    }
    Some(thing)
}
