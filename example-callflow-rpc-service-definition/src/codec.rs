use bitcode::{DecodeOwned, Encode};
use std::io;

pub(crate) fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, io::Error> {
    Ok(bitcode::encode(value))
}

pub(crate) fn decode<T: DecodeOwned>(bytes: &[u8]) -> Result<T, io::Error> {
    bitcode::decode::<T>(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
