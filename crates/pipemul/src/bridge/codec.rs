//! Fixed-width codec for coordinator-worker communication.
//!
//! Frames are raw native-endian `i32`s with no length prefix, delimiter or
//! checksum; both ends know the frame sizes. Works over any
//! AsyncRead/AsyncWrite (child stdin/stdout pipes, in-memory duplex in tests).

use std::io;

use tokio_util::bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::bridge::protocol::{PartialRequest, PartialResponse};

const INT_SIZE: usize = size_of::<i32>();

/// Request frames: two `i32`s (x, y), 8 bytes.
#[derive(Debug, Default)]
pub struct RequestCodec;

impl RequestCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RequestCodec {
    type Item = PartialRequest;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < 2 * INT_SIZE {
            return Ok(None);
        }
        let x = src.get_i32_ne();
        let y = src.get_i32_ne();
        Ok(Some(PartialRequest { x, y }))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(truncated_frame("request")),
        }
    }
}

impl Encoder<PartialRequest> for RequestCodec {
    type Error = io::Error;

    fn encode(&mut self, item: PartialRequest, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(2 * INT_SIZE);
        dst.put_i32_ne(item.x);
        dst.put_i32_ne(item.y);
        Ok(())
    }
}

/// Response frames: one `i32` product, 4 bytes.
#[derive(Debug, Default)]
pub struct ResponseCodec;

impl ResponseCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ResponseCodec {
    type Item = PartialResponse;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < INT_SIZE {
            return Ok(None);
        }
        let product = src.get_i32_ne();
        Ok(Some(PartialResponse { product }))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(truncated_frame("response")),
        }
    }
}

impl Encoder<PartialResponse> for ResponseCodec {
    type Error = io::Error;

    fn encode(&mut self, item: PartialResponse, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INT_SIZE);
        dst.put_i32_ne(item.product);
        Ok(())
    }
}

fn truncated_frame(channel: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{channel} channel closed mid-frame"),
    )
}
