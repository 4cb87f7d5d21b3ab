//! Coordinator - owns the operands, the worker subprocess, and the result.
//!
//! Flow:
//! 1. Spawn the worker with piped stdin/stdout (request and response channels)
//! 2. Drive the four partial-product round-trips in fixed order
//! 3. Close the request channel and reap the worker
//! 4. Recombine the partials with positional scaling

use std::process::Stdio;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::bridge::codec::{RequestCodec, ResponseCodec};
use crate::bridge::protocol::PartialRequest;
use crate::operand::Operand;

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("failed to spawn worker: {0}")]
    Spawn(String),
    #[error("channel error: {0}")]
    Channel(#[from] std::io::Error),
    #[error("worker crashed: response channel closed before reply")]
    WorkerCrashed,
    #[error("worker exited with {0}")]
    WorkerFailed(std::process::ExitStatus),
}

#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("failed to spawn process: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Extension point for different worker spawn strategies.
///
/// The spawned child must treat its stdin as the request channel and its
/// stdout as the response channel; the subprocess API hands each side
/// exclusive ownership of its ends, so no manual close-unused-ends dance
/// is needed.
pub trait WorkerSpawner: Send + Sync {
    fn spawn(&self) -> Result<Child, SpawnError>;
}

/// Spawner that re-invokes the current executable in worker mode.
pub struct SelfSpawner;

impl WorkerSpawner for SelfSpawner {
    fn spawn(&self) -> Result<Child, SpawnError> {
        let exe = std::env::current_exe()?;
        let child = Command::new(exe)
            .arg("--worker")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        Ok(child)
    }
}

/// The four partial products, in collection order.
///
/// For operands split as (high1, low1) and (high2, low2):
/// A = high1*high2, B = high1*low2, C = low1*high2, D = low1*low2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partials {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}

impl Partials {
    /// Scale the partials into positional terms.
    ///
    /// The factors of A sit four digit positions above the units, B and C
    /// two positions above. Widened to `i64` before scaling so the
    /// recombination stays clear of 32-bit limits.
    pub fn recombine(&self) -> Multiplication {
        Multiplication {
            x: i64::from(self.a) * 10_000,
            y: i64::from(self.b + self.c) * 100,
            z: i64::from(self.d),
        }
    }
}

/// The three positional terms of the final product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplication {
    /// `A * 10_000`
    pub x: i64,
    /// `(B + C) * 100`
    pub y: i64,
    /// `D`
    pub z: i64,
}

impl Multiplication {
    pub fn result(&self) -> i64 {
        self.x + self.y + self.z
    }
}

/// Drive the partial-product exchanges over an already-open channel pair.
///
/// Exactly four round-trips in fixed order, grouped as three calculation
/// steps: X from (high1,high2); Y from (high1,low2) and (low1,high2) as two
/// separate round-trips; Z from (low1,low2). Each round-trip blocks on its
/// response before the next request - at most one request is in flight.
pub async fn exchange_partials<W, R>(
    requests: &mut FramedWrite<W, RequestCodec>,
    responses: &mut FramedRead<R, ResponseCodec>,
    num1: Operand,
    num2: Operand,
) -> Result<Partials, CoordinatorError>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    let split1 = num1.split();
    let split2 = num2.split();

    tracing::debug!(%num1, high = split1.high, low = split1.low, "Decomposed first operand");
    tracing::debug!(%num2, high = split2.high, low = split2.low, "Decomposed second operand");

    tracing::info!("Calculating X");
    let a = round_trip(requests, responses, split1.high, split2.high).await?;

    tracing::info!("Calculating Y");
    let b = round_trip(requests, responses, split1.high, split2.low).await?;
    let c = round_trip(requests, responses, split1.low, split2.high).await?;

    tracing::info!("Calculating Z");
    let d = round_trip(requests, responses, split1.low, split2.low).await?;

    Ok(Partials { a, b, c, d })
}

async fn round_trip<W, R>(
    requests: &mut FramedWrite<W, RequestCodec>,
    responses: &mut FramedRead<R, ResponseCodec>,
    x: i32,
    y: i32,
) -> Result<i32, CoordinatorError>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    tracing::info!(x, y, "Sending factors to worker");
    requests.send(PartialRequest { x, y }).await?;

    match responses.next().await {
        Some(Ok(response)) => {
            tracing::info!(product = response.product, "Received product from worker");
            Ok(response.product)
        }
        Some(Err(e)) => Err(CoordinatorError::Channel(e)),
        None => Err(CoordinatorError::WorkerCrashed),
    }
}

/// Spawn a worker, delegate the partial multiplications, reap it, and
/// recombine the partials into the final product.
pub async fn multiply(
    num1: Operand,
    num2: Operand,
    spawner: &dyn WorkerSpawner,
) -> Result<Multiplication, CoordinatorError> {
    tracing::info!("Spawning worker subprocess");
    let mut child = spawner
        .spawn()
        .map_err(|e| CoordinatorError::Spawn(e.to_string()))?;

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| CoordinatorError::Spawn("stdin not captured".to_string()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CoordinatorError::Spawn("stdout not captured".to_string()))?;

    let mut requests = FramedWrite::new(stdin, RequestCodec::new());
    let mut responses = FramedRead::new(stdout, ResponseCodec::new());

    let partials = exchange_partials(&mut requests, &mut responses, num1, num2).await?;

    // Dropping the request writer closes the child's stdin; the worker sees
    // end-of-stream and exits.
    drop(requests);
    drop(responses);

    tracing::debug!("Waiting for worker to exit");
    let status = child.wait().await?;
    if !status.success() {
        return Err(CoordinatorError::WorkerFailed(status));
    }
    tracing::debug!("Worker reaped");

    Ok(partials.recombine())
}
