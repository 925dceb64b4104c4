// =========================================================
// Shared Mock Components
// =========================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ClientConfig, HttpRequest, HttpResponse, StoreClient, Transport};
use crate::error::{ApiError, ApiResult};
use crate::session::{MemoryTokenStore, Session, TokenStore};

pub(crate) const TEST_BASE_URL: &str = "http://localhost:4000/api/v1";

#[derive(Default)]
struct MockState {
    /// Every request sent, in order
    log: RefCell<Vec<HttpRequest>>,
    /// Queued replies; an empty queue fails the request
    replies: RefCell<VecDeque<ApiResult<HttpResponse>>>,
}

/// Scripted transport: replies are consumed in the order they were queued.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Rc<MockState>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) {
        self.state.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.state
            .replies
            .borrow_mut()
            .push_back(Err(ApiError::transport(message)));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.log.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.state.log.borrow().len()
    }

    /// `"PUT /cart/c1"` style summaries, base URL stripped
    pub(crate) fn calls(&self) -> Vec<String> {
        self.state
            .log
            .borrow()
            .iter()
            .map(|r| {
                let path = r.url.strip_prefix(TEST_BASE_URL).unwrap_or(&r.url);
                format!("{} {}", r.method.as_str(), path)
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.state.log.borrow_mut().push(req);
        self.state
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted reply")))
    }
}

pub(crate) type TestClient = StoreClient<MockTransport, MemoryTokenStore>;

/// Client wired to `transport`, returning the token store for inspection.
pub(crate) fn client_with(
    transport: &MockTransport,
    token: Option<&str>,
) -> (TestClient, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    if let Some(token) = token {
        store.save(token);
    }
    let client = StoreClient::new(
        transport.clone(),
        Session::new(store.clone()),
        ClientConfig::new(TEST_BASE_URL),
    );
    (client, store)
}
