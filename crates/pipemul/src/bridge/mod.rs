//! Wire protocol for coordinator-worker communication.
//!
//! Two unidirectional channels: requests flow coordinator→worker on the
//! child's stdin, responses flow worker→coordinator on the child's stdout.
//!
//! - **protocol**: message types ([`PartialRequest`], [`PartialResponse`])
//! - **codec**: fixed-width binary framing for AsyncRead/AsyncWrite
//!
//! [`PartialRequest`]: protocol::PartialRequest
//! [`PartialResponse`]: protocol::PartialResponse

pub mod codec;
pub mod protocol;
