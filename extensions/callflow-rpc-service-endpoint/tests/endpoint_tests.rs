use callflow::rpc::{
    ActiveCall, CallError, CallShape, RpcHandler, RpcHandlerError, RpcMethodDescriptor, Single,
    StatusCode, WireStatus,
};
use callflow_rpc_service::{RpcMethod, request_response_handler, server_streaming_handler};
use callflow_rpc_service_endpoint::{
    RpcHandlerMap, RpcRegisteredMethod, RpcServiceEndpoint, RpcServiceEndpointInterface,
    error::RpcServiceEndpointError,
};
use example_callflow_rpc_service_definition::{Echo, Repeat, RepeatRequest, Sum};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

// --- Test Setup: a call that records what the endpoint did to it ---

#[derive(Debug, Default)]
struct Recorded {
    writes: Vec<Vec<u8>>,
    statuses: Vec<WireStatus>,
    released: usize,
    finished: usize,
}

struct RecordingCall {
    requests: VecDeque<Vec<u8>>,
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingCall {
    fn new(requests: Vec<Vec<u8>>) -> (Self, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        (
            RecordingCall {
                requests: requests.into(),
                recorded: recorded.clone(),
            },
            recorded,
        )
    }
}

#[async_trait::async_trait]
impl ActiveCall for RecordingCall {
    async fn read_request(&mut self) -> Result<Option<Vec<u8>>, CallError> {
        Ok(self.requests.pop_front())
    }

    async fn write_response(&mut self, message: Vec<u8>) -> Result<(), CallError> {
        self.recorded.lock().unwrap().writes.push(message);
        Ok(())
    }

    async fn send_status(&mut self, status: WireStatus) -> Result<(), CallError> {
        self.recorded.lock().unwrap().statuses.push(status);
        Ok(())
    }

    async fn run_bidi(&mut self, handler: &RpcHandler) -> Result<(), RpcHandlerError> {
        handler.drive_bidi(self).await
    }

    fn release_resources(&mut self) {
        self.recorded.lock().unwrap().released += 1;
    }

    async fn finish(&mut self) {
        self.recorded.lock().unwrap().finished += 1;
    }
}

fn echo_handler() -> RpcHandler {
    request_response_handler::<Echo, _, _, _>(|bytes: Vec<u8>, _ctx| {
        Box::pin(async move { Ok(bytes) })
    })
}

// --- Tests ---

#[tokio::test]
async fn test_handler_registration() {
    let endpoint = RpcServiceEndpoint::new();

    let result1 = endpoint.register_method::<Echo>(echo_handler()).await;
    assert!(result1.is_ok());

    let result2 = endpoint.register_method::<Echo>(echo_handler()).await;
    assert!(matches!(
        result2,
        Err(RpcServiceEndpointError::Duplicate { ref method }) if method == "example.echo"
    ));
}

#[tokio::test]
async fn test_registration_rejects_arity_mismatch() {
    let endpoint = RpcServiceEndpoint::new();

    // A `(request, context)` handler cannot serve a client-streaming method.
    let result = endpoint.register(Sum::descriptor(), echo_handler()).await;

    match result {
        Err(RpcServiceEndpointError::Arity { method, source }) => {
            assert_eq!(method, "example.sum");
            assert_eq!(source.shape, CallShape::ClientStreaming);
            assert_eq!(source.expected, 1);
            assert_eq!(source.actual, 2);
        }
        other => panic!("expected arity error, got {:?}", other),
    }
    assert!(endpoint.lookup(Sum::METHOD_NAME).await.is_none());
}

#[tokio::test]
async fn test_lookup_returns_registered_descriptor() {
    let endpoint = RpcServiceEndpoint::new();
    endpoint
        .register_method::<Echo>(echo_handler())
        .await
        .unwrap();

    let method = endpoint.lookup("example.echo").await.unwrap();
    assert_eq!(*method.descriptor, Echo::descriptor());
    assert_eq!(method.handler.arity(), 2);
}

#[tokio::test]
async fn test_dispatch_call_success() {
    let endpoint = RpcServiceEndpoint::new();
    endpoint
        .register_method::<Echo>(echo_handler())
        .await
        .unwrap();

    let (call, recorded) = RecordingCall::new(vec![b"hello".to_vec()]);
    endpoint.dispatch_call(Echo::METHOD_NAME, call).await;

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.writes, vec![b"hello".to_vec()]);
    assert_eq!(recorded.statuses, vec![WireStatus::ok()]);
    assert_eq!(recorded.released, 1);
    assert_eq!(recorded.finished, 1);
}

#[tokio::test]
async fn test_dispatch_call_server_streaming() {
    let endpoint = RpcServiceEndpoint::new();
    endpoint
        .register_method::<Repeat>(server_streaming_handler::<Repeat, _, _, _>(
            |req: RepeatRequest, _ctx| {
                Box::pin(async move {
                    Ok((1..=req.times)
                        .map(|i| format!("{} {}", i, req.text))
                        .collect())
                })
            },
        ))
        .await
        .unwrap();

    let request = Repeat::encode_request(RepeatRequest {
        text: "hip".into(),
        times: 3,
    })
    .unwrap();
    let (call, recorded) = RecordingCall::new(vec![request]);
    endpoint.dispatch_call(Repeat::METHOD_NAME, call).await;

    let recorded = recorded.lock().unwrap();
    let lines: Vec<String> = recorded
        .writes
        .iter()
        .map(|bytes| Repeat::decode_response(bytes).unwrap())
        .collect();
    assert_eq!(lines, vec!["1 hip", "2 hip", "3 hip"]);
    assert_eq!(recorded.statuses, vec![WireStatus::ok()]);
}

#[tokio::test]
async fn test_dispatch_call_method_not_found() {
    let endpoint = RpcServiceEndpoint::new();

    let (call, recorded) = RecordingCall::new(vec![b"ignored".to_vec()]);
    endpoint.dispatch_call("example.missing", call).await;

    let recorded = recorded.lock().unwrap();
    assert!(recorded.writes.is_empty());
    assert_eq!(
        recorded.statuses,
        vec![WireStatus::new(
            StatusCode::Unimplemented,
            "method not found: example.missing"
        )]
    );
    assert_eq!(recorded.released, 1);
    assert_eq!(recorded.finished, 1);
}

// --- Method ID collisions ---

/// An endpoint whose table can be seeded directly, to place an entry under
/// another method's ID.
struct SeededEndpoint {
    handlers: Arc<RwLock<RpcHandlerMap>>,
}

impl SeededEndpoint {
    fn with_entry(method_id: u64, registered_name: &'static str) -> Self {
        let mut handlers = RpcHandlerMap::new();
        handlers.insert(
            method_id,
            RpcRegisteredMethod {
                descriptor: Arc::new(RpcMethodDescriptor::from_markers::<
                    Single<Vec<u8>>,
                    Single<Vec<u8>>,
                >(registered_name)),
                handler: echo_handler(),
            },
        );
        SeededEndpoint {
            handlers: Arc::new(RwLock::new(handlers)),
        }
    }
}

#[async_trait::async_trait]
impl RpcServiceEndpointInterface for SeededEndpoint {
    type HandlersLock = RwLock<RpcHandlerMap>;

    fn get_handlers(&self) -> Arc<Self::HandlersLock> {
        self.handlers.clone()
    }
}

#[test]
fn test_registered_method_serves_only_its_own_name() {
    let method = RpcRegisteredMethod {
        descriptor: Arc::new(Echo::descriptor()),
        handler: echo_handler(),
    };
    assert!(method.serves("example.echo"));
    assert!(!method.serves("example.echo2"));
}

#[tokio::test]
async fn test_lookup_ignores_entry_registered_under_another_name() {
    let endpoint = SeededEndpoint::with_entry(Echo::METHOD_ID, "example.impostor");

    assert!(endpoint.lookup(Echo::METHOD_NAME).await.is_none());
    assert!(endpoint.lookup("example.impostor").await.is_none());
}

#[tokio::test]
async fn test_dispatch_call_does_not_route_on_id_collision() {
    let endpoint = SeededEndpoint::with_entry(Echo::METHOD_ID, "example.impostor");

    let (call, recorded) = RecordingCall::new(vec![b"hello".to_vec()]);
    endpoint.dispatch_call(Echo::METHOD_NAME, call).await;

    let recorded = recorded.lock().unwrap();
    assert!(recorded.writes.is_empty());
    assert_eq!(
        recorded.statuses,
        vec![WireStatus::new(
            StatusCode::Unimplemented,
            "method not found: example.echo"
        )]
    );
    assert_eq!(recorded.finished, 1);
}

#[tokio::test]
async fn test_registration_reports_id_collision() {
    let endpoint = SeededEndpoint::with_entry(Echo::METHOD_ID, "example.impostor");

    let result = endpoint.register_method::<Echo>(echo_handler()).await;
    assert_eq!(
        result,
        Err(RpcServiceEndpointError::IdCollision {
            method: "example.echo".to_string(),
            existing: "example.impostor".to_string(),
        })
    );
}
