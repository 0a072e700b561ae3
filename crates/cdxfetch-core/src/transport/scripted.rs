//! In-memory transport that replays a fixed script of outcomes.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use super::{HttpResponse, PreparedRequest, SoftKind, Transport, TransportError};

pub(crate) type Step = Result<HttpResponse, TransportError>;

pub(crate) fn status(code: u16) -> Step {
    Ok(HttpResponse {
        status: code,
        url: "https://web.archive.org/cdx/search/cdx".into(),
        headers: Vec::new(),
        body: Vec::new(),
    })
}

pub(crate) fn reset() -> Step {
    Err(TransportError::soft(SoftKind::Connection, "connection reset by peer"))
}

pub(crate) fn dns() -> Step {
    Err(TransportError::soft(
        SoftKind::Dns,
        "[6] Couldn't resolve host name (Could not resolve host)",
    ))
}

pub(crate) fn protocol() -> Step {
    Err(TransportError::Protocol("received HTTP/0.9 when not allowed".into()))
}

/// Plays `steps` in order, then repeats `tail` forever (panics if there is none).
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    tail: Option<Step>,
    seen: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn then_forever(mut self, step: Step) -> Self {
        self.tail = Some(step);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<PreparedRequest> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn get(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.seen.lock().unwrap().push(request.clone());
        let next = self.steps.lock().unwrap().pop_front();
        let step = next
            .or_else(|| self.tail.clone())
            .expect("transport script exhausted");
        std::future::ready(step)
    }
}
