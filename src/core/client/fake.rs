//! In-memory [`ResearcherApi`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ApiRequest, ApiResult, ResearcherApi};

/// Replays queued responses and records every request it receives.
///
/// Once the queue is empty every call answers `{}`.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<VecDeque<ApiResult<Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: ApiResult<Value>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ResearcherApi for FakeApi {
    async fn get(&self, request: &ApiRequest) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}
