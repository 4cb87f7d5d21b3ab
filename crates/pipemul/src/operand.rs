//! Validated 4-digit operands and their digit decomposition.

use thiserror::Error;

/// Smallest accepted operand (inclusive).
pub const MIN_OPERAND: i32 = 1000;
/// Largest accepted operand (inclusive).
pub const MAX_OPERAND: i32 = 9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperandError {
    #[error("{0} is out of range: operands must be 4-digit integers (1000-9999)")]
    OutOfRange(i32),
}

/// A validated integer in [1000, 9999].
///
/// Construction through [`Operand::new`] is the only way to obtain one, so
/// every `Operand` downstream of argument parsing is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand(i32);

impl Operand {
    pub fn new(n: i32) -> Result<Self, OperandError> {
        if (MIN_OPERAND..=MAX_OPERAND).contains(&n) {
            Ok(Self(n))
        } else {
            Err(OperandError::OutOfRange(n))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Split into two-digit halves: `high = n / 100`, `low = n % 100`.
    pub fn split(&self) -> DigitSplit {
        DigitSplit {
            high: self.0 / 100,
            low: self.0 % 100,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two-digit halves of an operand.
///
/// `high * 100 + low` reconstructs the operand; `high` is in [10, 99] and
/// `low` in [0, 99] for any valid `Operand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSplit {
    pub high: i32,
    pub low: i32,
}
