//! Scripted in-memory transport for tests.
//!
//! Replies are keyed by operation name and repeat for every call. Every
//! request is recorded so tests can assert on what was (or was not) sent.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use crate::query::Operation;
use crate::response::HttpResponse;
use crate::transport::Transport;
use crate::FetchError;

/// What the mock answers for an operation.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with this `data` object.
    Data(Value),
    /// 200 with `data: null` and these error messages.
    GraphErrors(Vec<String>),
    /// Non-2xx status with an empty body.
    Status(u16),
    /// The request never completes.
    Failure(String),
}

impl MockReply {
    /// `data` with the operation's root collection holding `items`.
    pub fn items(operation: Operation, items: Vec<Value>) -> Self {
        let total = items.len();
        Self::items_with_total(operation, items, total as u64)
    }

    pub fn items_with_total(operation: Operation, items: Vec<Value>, total: u64) -> Self {
        let mut data = serde_json::Map::new();
        data.insert(
            operation.root_field().to_string(),
            json!({ "total": total, "items": items }),
        );
        MockReply::Data(Value::Object(data))
    }

    fn into_response(self) -> Result<HttpResponse, FetchError> {
        match self {
            MockReply::Data(data) => Ok(HttpResponse::json_ok(&json!({ "data": data }))),
            MockReply::GraphErrors(messages) => {
                let errors: Vec<Value> = messages
                    .into_iter()
                    .map(|message| json!({ "message": message }))
                    .collect();
                Ok(HttpResponse::json_ok(&json!({ "data": null, "errors": errors })))
            }
            MockReply::Status(status) => Ok(HttpResponse::new(status, Vec::new())),
            MockReply::Failure(message) => Err(FetchError::Transport(message)),
        }
    }
}

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub operation: String,
    pub variables: Value,
}

/// Transport answering from a script instead of the network.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for an operation.
    pub fn with_reply(self, operation: Operation, reply: MockReply) -> Self {
        self.set_reply(operation, reply);
        self
    }

    /// Replace the reply for an operation.
    pub fn set_reply(&self, operation: Operation, reply: MockReply) {
        lock(&self.replies).insert(operation.name().to_string(), reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.operation == operation.name())
            .count()
    }

    /// Variables of every call to an operation, in order.
    pub fn variables_for(&self, operation: Operation) -> Vec<Value> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.operation == operation.name())
            .map(|call| call.variables.clone())
            .collect()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for MockTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<HttpResponse, FetchError> {
        let operation = body
            .get("operationName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        lock(&self.calls).push(RecordedCall {
            url: url.to_string(),
            operation: operation.clone(),
            variables: body.get("variables").cloned().unwrap_or(Value::Null),
        });

        let reply = lock(&self.replies).get(&operation).cloned();
        match reply {
            Some(reply) => reply.into_response(),
            None => Err(FetchError::Transport(format!("No reply scripted for {}", operation))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.test/graphql?auth=k").unwrap()
    }

    #[tokio::test]
    async fn test_records_calls() {
        let mock = MockTransport::new().with_reply(
            Operation::SearchImages,
            MockReply::items(Operation::SearchImages, vec![]),
        );
        let body = json!({
            "operationName": "SearchImages",
            "variables": { "labelGroupName": "x" }
        });

        mock.post_json(&url(), &body).await.unwrap();

        assert_eq!(mock.call_count(Operation::SearchImages), 1);
        assert_eq!(
            mock.variables_for(Operation::SearchImages),
            vec![json!({ "labelGroupName": "x" })]
        );
    }

    #[tokio::test]
    async fn test_unscripted_operation_fails() {
        let mock = MockTransport::new();
        let body = json!({ "operationName": "GetImage", "variables": {} });

        let err = mock.post_json(&url(), &body).await.unwrap_err();
        assert_eq!(err.message(), "No reply scripted for GetImage");
        assert_eq!(mock.total_calls(), 1);
    }

    #[test]
    fn test_items_reply_shape() {
        match MockReply::items(Operation::GetAllProducts, vec![json!({ "ContentGuid": "a" })]) {
            MockReply::Data(data) => {
                assert_eq!(data["ECProducts_V1"]["total"], 1);
                assert_eq!(data["ECProducts_V1"]["items"][0]["ContentGuid"], "a");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }
}
