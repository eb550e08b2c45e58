//! Shared test fixtures: an in-memory [`ThreadClient`] and JSON record builders.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use crate::client::ThreadClient;
use crate::error::{Error, Result};
use crate::types::{COMMENT_PREFIX, Comment};

/// One request seen by [`MockClient`]
#[derive(Clone, Debug)]
pub(crate) struct RecordedCall {
    pub(crate) uri: String,
    pub(crate) query: Vec<(String, String)>,
}

impl RecordedCall {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory client that records every call.
///
/// By default every requested ID resolves to a comment. Deep-expansion answers
/// can be scripted per `children` value; scripted answers are served in order,
/// after which the default answer is used again.
#[derive(Default)]
pub(crate) struct MockClient {
    calls: Mutex<Vec<RecordedCall>>,
    scripted: Mutex<HashMap<String, VecDeque<Value>>>,
    lookup_delays: HashMap<String, Duration>,
    failures: HashSet<String>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer the next deep expansion of `children` with `response`
    pub(crate) fn script(self, children: &str, response: Value) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .entry(children.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Delay the bulk lookup whose first ID is `first_id`
    pub(crate) fn delay_lookup(mut self, first_id: &str, delay: Duration) -> Self {
        self.lookup_delays.insert(first_id.to_string(), delay);
        self
    }

    /// Fail any request whose `id` or `children` parameter equals `value`
    pub(crate) fn fail_on(mut self, value: &str) -> Self {
        self.failures.insert(value.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of IDs in each bulk lookup, in call order
    pub(crate) fn lookup_sizes(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter(|call| call.uri == "api/info")
            .filter_map(|call| call.param("id"))
            .map(|ids| ids.split(',').count())
            .collect()
    }

    /// `children` parameter of each deep expansion, in call order
    pub(crate) fn expanded_batches(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|call| call.uri == "api/morechildren")
            .filter_map(|call| call.param("children").map(str::to_string))
            .collect()
    }

    fn record(&self, uri: &str, query: &[(&str, String)]) -> RecordedCall {
        let call = RecordedCall {
            uri: uri.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        };
        self.calls.lock().unwrap().push(call.clone());
        call
    }

    fn check_failure(&self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) if self.failures.contains(value) => Err(Error::Http {
                status: 500,
                url: format!("mock://{value}"),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ThreadClient for MockClient {
    async fn fetch_listing(&self, uri: &str, query: &[(&str, String)]) -> Result<Vec<Comment>> {
        let call = self.record(uri, query);
        let ids = call.param("id").unwrap_or_default();
        let first = ids
            .split(',')
            .next()
            .unwrap_or_default()
            .trim_start_matches(COMMENT_PREFIX);
        if let Some(delay) = self.lookup_delays.get(first) {
            tokio::time::sleep(*delay).await;
        }
        self.check_failure(call.param("id"))?;

        Ok(ids
            .split(',')
            .map(|fullname| comment(fullname.trim_start_matches(COMMENT_PREFIX), "t3_post"))
            .collect())
    }

    async fn fetch_raw(&self, uri: &str, query: &[(&str, String)]) -> Result<Value> {
        let call = self.record(uri, query);
        let children = call.param("children").unwrap_or_default();
        self.check_failure(Some(children))?;

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(children)
            .and_then(VecDeque::pop_front);
        if let Some(response) = scripted {
            return Ok(response);
        }

        let link_id = call.param("link_id").unwrap_or_default();
        Ok(morechildren_response(
            children
                .split(',')
                .map(|id| comment_json(id, link_id, link_id))
                .collect(),
        ))
    }
}

pub(crate) fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Comment `id` directly under submission `link_id`
pub(crate) fn comment(id: &str, link_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        name: format!("{COMMENT_PREFIX}{id}"),
        parent_id: link_id.to_string(),
        link_id: link_id.to_string(),
        author: "tester".to_string(),
        body: format!("body of {id}"),
        ..Comment::default()
    }
}

pub(crate) fn comment_json(id: &str, parent_id: &str, link_id: &str) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "name": format!("{COMMENT_PREFIX}{id}"),
            "parent_id": parent_id,
            "link_id": link_id,
            "author": "tester",
            "body": format!("body of {id}"),
            "score": 1,
            "replies": ""
        }
    })
}

pub(crate) fn more_json(id: &str, parent_id: &str, children: &[&str]) -> Value {
    json!({
        "kind": "more",
        "data": {
            "count": children.len(),
            "name": format!("{COMMENT_PREFIX}{id}"),
            "id": id,
            "parent_id": parent_id,
            "depth": 0,
            "children": children
        }
    })
}

pub(crate) fn morechildren_response(things: Vec<Value>) -> Value {
    json!({
        "json": {
            "errors": [],
            "data": { "things": things }
        }
    })
}
