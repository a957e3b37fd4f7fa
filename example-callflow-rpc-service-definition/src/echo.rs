use callflow::rpc::Single;
use callflow_rpc_service::RpcMethod;
use std::io;

/// Request/response: returns the request bytes unchanged.
pub struct Echo;

impl RpcMethod for Echo {
    const METHOD_NAME: &'static str = "example.echo";

    type Request = Single<Vec<u8>>;
    type Response = Single<Vec<u8>>;

    fn encode_request(input: Vec<u8>) -> Result<Vec<u8>, io::Error> {
        Ok(input)
    }

    fn decode_request(bytes: &[u8]) -> Result<Vec<u8>, io::Error> {
        Ok(bytes.to_vec())
    }

    fn encode_response(output: Vec<u8>) -> Result<Vec<u8>, io::Error> {
        Ok(output)
    }

    fn decode_response(bytes: &[u8]) -> Result<Vec<u8>, io::Error> {
        Ok(bytes.to_vec())
    }
}
