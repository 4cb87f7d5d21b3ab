//! Message types for the coordinator-worker pipe pair.
//!
//! Messages carry no identity or sequence metadata: each direction is a
//! single-producer single-consumer FIFO byte stream and at most one request
//! is in flight, so ordering is implicit in channel order.

/// One partial multiplication: an ordered pair of two-digit factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialRequest {
    pub x: i32,
    pub y: i32,
}

/// The worker's answer to the matching [`PartialRequest`].
///
/// Factors are at most two digits each, so the product fits comfortably in
/// an `i32` (99 * 99 max).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialResponse {
    pub product: i32,
}
