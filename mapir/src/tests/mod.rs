//! Test fixtures shared by the unit tests of the crate.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::channel::oneshot;
use parking_lot::Mutex;

use crate::error::MapirError;
use crate::platform::{HttpTransport, RawResponse};
use crate::request::ApiRequest;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

enum MockResponse {
    Ready(Result<RawResponse, MapirError>),
    Gated(oneshot::Receiver<()>, Result<RawResponse, MapirError>),
}

/// Transport returning queued responses in order and recording the requests it receives.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: &'static str) {
        self.responses
            .lock()
            .push_back(MockResponse::Ready(Ok(response(status, body))));
    }

    /// Queues a response that is returned only after the returned sender fires (or is dropped).
    pub(crate) fn respond_gated(&self, status: u16, body: &'static str) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.responses
            .lock()
            .push_back(MockResponse::Gated(receiver, Ok(response(status, body))));
        sender
    }

    pub(crate) fn fail(&self, error: MapirError) {
        self.responses.lock().push_back(MockResponse::Ready(Err(error)));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

fn response(status: u16, body: &'static str) -> RawResponse {
    RawResponse {
        status,
        body: Bytes::from_static(body.as_bytes()),
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, MapirError> {
        self.requests.lock().push(request);
        let next = self.responses.lock().pop_front();

        match next {
            Some(MockResponse::Ready(result)) => result,
            Some(MockResponse::Gated(gate, result)) => {
                let _ = gate.await;
                result
            }
            None => Err(MapirError::Transport("no response queued".into())),
        }
    }
}
