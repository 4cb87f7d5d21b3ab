//! pipemul: digit-split multiplication delegated to a worker subprocess.

pub mod bridge;
pub mod coordinator;
mod operand;
pub mod worker;

pub use coordinator::{
    CoordinatorError, Multiplication, Partials, SelfSpawner, SpawnError, WorkerSpawner, multiply,
};
pub use operand::{DigitSplit, MAX_OPERAND, MIN_OPERAND, Operand, OperandError};
pub use worker::run_worker;
