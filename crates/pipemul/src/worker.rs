//! Worker side of the pipe pair - runs inside the spawned subprocess.
//!
//! A stateless multiply loop: read one request frame, multiply, write the
//! product back, until the coordinator closes the request channel. The
//! parent side (spawning, round-trips, recombination) is in coordinator.rs.
//!
//! The worker logs only to stderr; its stdout is the response channel.

use std::io;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::bridge::codec::{RequestCodec, ResponseCodec};
use crate::bridge::protocol::PartialResponse;

/// Run the worker multiply loop until the request channel closes.
///
/// End-of-stream on the request channel (including a frame truncated by the
/// close) is normal shutdown, not an error. Any other channel failure is
/// fatal and propagated to the caller.
pub async fn run_worker<R, W>(requests: R, responses: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut requests = FramedRead::new(requests, RequestCodec::new());
    let mut responses = FramedWrite::new(responses, ResponseCodec::new());

    loop {
        match requests.next().await {
            Some(Ok(request)) => {
                tracing::debug!(x = request.x, y = request.y, "Received factors");
                let product = request.x * request.y;
                tracing::debug!(product, "Sending product");
                responses.send(PartialResponse { product }).await?;
            }
            Some(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("Request channel closed mid-frame, shutting down");
                break;
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Request channel error");
                return Err(e);
            }
            None => {
                tracing::debug!("Request channel closed, shutting down");
                break;
            }
        }
    }

    tracing::info!("Worker exiting");
    Ok(())
}
