use std::fmt;

use crate::time::{TimeError, TimeResult};
use crate::timespan::{TimeSpan, TimeSpanResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperation {
  Add,
  Subtract,
}

///! Composite of two time spans of possibly different kinds joined by an
///! addition or subtraction, resolved against a tempo map at conversion
///! time.
#[derive(Debug, Clone, PartialEq)]
pub struct MathTime {
  lhs: Box<TimeSpan>,
  operation: MathOperation,
  rhs: Box<TimeSpan>,
}

impl MathTime {
  pub fn new(lhs: TimeSpan, operation: MathOperation, rhs: TimeSpan) -> MathTime {
    MathTime {
      lhs: Box::new(lhs),
      operation,
      rhs: Box::new(rhs),
    }
  }

  pub fn add(lhs: TimeSpan, rhs: TimeSpan) -> MathTime {
    MathTime::new(lhs, MathOperation::Add, rhs)
  }

  pub fn subtract(lhs: TimeSpan, rhs: TimeSpan) -> MathTime {
    MathTime::new(lhs, MathOperation::Subtract, rhs)
  }

  pub fn get_lhs(&self) -> &TimeSpan {
    &self.lhs
  }

  pub fn get_operation(&self) -> MathOperation {
    self.operation
  }

  pub fn get_rhs(&self) -> &TimeSpan {
    &self.rhs
  }

  /// Scaling distributes over both operands.
  pub fn multiply(&self, multiplier: f64) -> TimeResult<MathTime> {
    Ok(MathTime::new(
      self.lhs.multiply(multiplier)?,
      self.operation,
      self.rhs.multiply(multiplier)?,
    ))
  }

  pub fn divide(&self, divisor: f64) -> TimeResult<MathTime> {
    Ok(MathTime::new(
      self.lhs.divide(divisor)?,
      self.operation,
      self.rhs.divide(divisor)?,
    ))
  }
}

impl fmt::Display for MathTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let operation = match self.operation {
      MathOperation::Add => '+',
      MathOperation::Subtract => '-',
    };
    write!(f, "({} {} {})", self.lhs, operation, self.rhs)
  }
}

/// Parses `(<span> + <span>)` or `(<span> - <span>)`, with operands in any
/// of the span grammars, recursively.
pub(crate) fn parse_math(input: &str) -> TimeSpanResult<TimeSpan> {
  let parse_error = || {
    TimeError::Parse {
      kind: "math",
      input: input.to_string(),
    }
    .into()
  };

  if !input.starts_with('(') || !input.ends_with(')') {
    return Err(parse_error());
  }
  let inner = &input[1..input.len() - 1];

  let bytes = inner.as_bytes();
  let mut depth = 0usize;
  for index in 0..bytes.len() {
    match bytes[index] {
      b'(' => depth += 1,
      b')' => {
        if depth == 0 {
          return Err(parse_error());
        }
        depth -= 1;
      }
      b'+' | b'-'
        if depth == 0
          && index > 0
          && bytes[index - 1] == b' '
          && index + 1 < bytes.len()
          && bytes[index + 1] == b' ' =>
      {
        let operation = if bytes[index] == b'+' {
          MathOperation::Add
        } else {
          MathOperation::Subtract
        };
        let lhs = super::parse(&inner[..index - 1])?;
        let rhs = super::parse(&inner[index + 2..])?;
        return Ok(TimeSpan::Math(MathTime::new(lhs, operation, rhs)));
      }
      _ => {}
    }
  }

  Err(parse_error())
}
