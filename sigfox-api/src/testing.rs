//! In-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use sigfox_core::{SigfoxError, SigfoxResult};

use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Scripted transport: records every request and replays canned
/// responses in order.
pub(crate) struct FakeTransport {
    requests: RefCell<Vec<TransportRequest>>,
    responses: RefCell<VecDeque<TransportResponse>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue a response for the next request.
    pub(crate) fn push_response(&self, status: u16, body: Value) {
        self.responses
            .borrow_mut()
            .push_back(TransportResponse { status, body });
    }

    /// The requests performed so far, in order.
    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn perform(&self, request: &TransportRequest) -> SigfoxResult<TransportResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| SigfoxError::Http("no scripted response left".into()))
    }
}

// Tests keep an `Rc` handle on the transport to inspect recorded
// requests after handing it to the client.
impl<T: Transport> Transport for std::rc::Rc<T> {
    fn perform(&self, request: &TransportRequest) -> SigfoxResult<TransportResponse> {
        (**self).perform(request)
    }
}
