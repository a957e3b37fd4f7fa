use crate::codec::{decode, encode};
use callflow::rpc::{Single, Stream};
use callflow_rpc_service::RpcMethod;
use std::io;

/// Client streaming: adds up every number the client sends.
pub struct Sum;

impl RpcMethod for Sum {
    const METHOD_NAME: &'static str = "example.sum";

    type Request = Stream<f64>;
    type Response = Single<f64>;

    fn encode_request(input: f64) -> Result<Vec<u8>, io::Error> {
        encode(&input)
    }

    fn decode_request(bytes: &[u8]) -> Result<f64, io::Error> {
        decode(bytes)
    }

    fn encode_response(output: f64) -> Result<Vec<u8>, io::Error> {
        encode(&output)
    }

    fn decode_response(bytes: &[u8]) -> Result<f64, io::Error> {
        decode(bytes)
    }
}
