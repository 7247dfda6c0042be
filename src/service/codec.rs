use std::marker::PhantomData;

use bytes::{BufMut, BytesMut};
use serde::Serialize;
use tokio_util::codec::Encoder;

use super::error::ServiceError;

/// Encodes records as newline-terminated JSON, one record per line.
#[derive(Debug)]
pub struct JsonLinesEncoder<T> {
    _record: PhantomData<fn(&T)>,
}

impl<T> Default for JsonLinesEncoder<T> {
    fn default() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<'a, T: Serialize> Encoder<&'a T> for JsonLinesEncoder<T> {
    type Error = ServiceError;

    fn encode(&mut self, item: &'a T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = serde_json::to_vec(item)?;
        dst.reserve(line.len() + 1);
        dst.put_slice(&line);
        dst.put_u8(b'\n');
        Ok(())
    }
}
