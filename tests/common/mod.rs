use callflow::rpc::{ActiveCall, CallError, RpcHandler, RpcHandlerError, WireStatus};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Everything the dispatcher did to a call, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOp {
    Read,
    Write(Vec<u8>),
    Status(WireStatus),
    RunBidi,
    Release,
    Finish,
}

/// Scripted `ActiveCall` that records every operation performed on it.
pub struct MockCall {
    reads: VecDeque<Result<Option<Vec<u8>>, CallError>>,
    write_failure: Option<CallError>,
    status_failure: Option<CallError>,
    bidi_outcome: Option<Result<(), RpcHandlerError>>,
    ops: Arc<Mutex<Vec<CallOp>>>,
}

impl MockCall {
    pub fn new() -> (Self, Arc<Mutex<Vec<CallOp>>>) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let call = MockCall {
            reads: VecDeque::new(),
            write_failure: None,
            status_failure: None,
            bidi_outcome: None,
            ops: ops.clone(),
        };
        (call, ops)
    }

    pub fn with_request(mut self, request: &[u8]) -> Self {
        self.reads.push_back(Ok(Some(request.to_vec())));
        self
    }

    pub fn with_read_failure(mut self, err: CallError) -> Self {
        self.reads.push_back(Err(err));
        self
    }

    pub fn with_write_failure(mut self, err: CallError) -> Self {
        self.write_failure = Some(err);
        self
    }

    /// Makes `send_status` fail as if the peer closed the call first.
    pub fn with_status_failure(mut self, err: CallError) -> Self {
        self.status_failure = Some(err);
        self
    }

    /// Makes `run_bidi` return `outcome` instead of driving the handler.
    pub fn with_bidi_outcome(mut self, outcome: Result<(), RpcHandlerError>) -> Self {
        self.bidi_outcome = Some(outcome);
        self
    }

    fn record(&self, op: CallOp) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait::async_trait]
impl ActiveCall for MockCall {
    async fn read_request(&mut self) -> Result<Option<Vec<u8>>, CallError> {
        self.record(CallOp::Read);
        self.reads.pop_front().unwrap_or(Ok(None))
    }

    async fn write_response(&mut self, message: Vec<u8>) -> Result<(), CallError> {
        self.record(CallOp::Write(message));
        match &self.write_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn send_status(&mut self, status: WireStatus) -> Result<(), CallError> {
        self.record(CallOp::Status(status));
        match &self.status_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn run_bidi(&mut self, handler: &RpcHandler) -> Result<(), RpcHandlerError> {
        self.record(CallOp::RunBidi);
        match self.bidi_outcome.take() {
            Some(outcome) => outcome,
            None => handler.drive_bidi(self).await,
        }
    }

    fn release_resources(&mut self) {
        self.record(CallOp::Release);
    }

    async fn finish(&mut self) {
        self.record(CallOp::Finish);
    }
}

pub fn statuses(ops: &[CallOp]) -> Vec<WireStatus> {
    ops.iter()
        .filter_map(|op| match op {
            CallOp::Status(status) => Some(status.clone()),
            _ => None,
        })
        .collect()
}

pub fn count(ops: &[CallOp], wanted: &CallOp) -> usize {
    ops.iter().filter(|op| *op == wanted).count()
}

pub fn writes(ops: &[CallOp]) -> Vec<Vec<u8>> {
    ops.iter()
        .filter_map(|op| match op {
            CallOp::Write(message) => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Finalization must always be the tail of the operation log.
pub fn assert_finalized_once(ops: &[CallOp]) {
    assert_eq!(count(ops, &CallOp::Release), 1, "ops: {:?}", ops);
    assert_eq!(count(ops, &CallOp::Finish), 1, "ops: {:?}", ops);
    assert_eq!(ops.last(), Some(&CallOp::Finish), "ops: {:?}", ops);
}
