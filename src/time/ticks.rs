use std::{
  cmp::{min, Ordering},
  fmt,
  ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
  str::FromStr,
};

use crate::time::{round_scale, TimeError, TimeResult};

#[derive(Debug, Eq, Copy, Clone, Hash)]
pub struct TicksTime(u64);

impl TicksTime {
  pub fn new(ticks: u64) -> TicksTime {
    TicksTime(ticks)
  }

  pub fn zero() -> TicksTime {
    TicksTime(0)
  }

  pub fn checked_sub(self, rhs: TicksTime) -> TimeResult<TicksTime> {
    self
      .0
      .checked_sub(rhs.0)
      .map(TicksTime)
      .ok_or(TimeError::NegativeTimeSpan)
  }

  pub fn multiply(self, multiplier: f64) -> TimeResult<TicksTime> {
    if multiplier < 0.0 {
      return Err(TimeError::InvalidMultiplier { multiplier });
    }
    Ok(TicksTime(round_scale(self.0, multiplier)))
  }

  pub fn divide(self, divisor: f64) -> TimeResult<TicksTime> {
    if divisor <= 0.0 {
      return Err(TimeError::InvalidDivisor { divisor });
    }
    Ok(TicksTime(round_scale(self.0, 1.0 / divisor)))
  }
}

impl Ord for TicksTime {
  fn cmp(&self, other: &TicksTime) -> Ordering {
    self.0.cmp(&other.0)
  }
}

impl PartialOrd for TicksTime {
  fn partial_cmp(&self, other: &TicksTime) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for TicksTime {
  fn eq(&self, other: &TicksTime) -> bool {
    self.0 == other.0
  }
}

impl Add for TicksTime {
  type Output = TicksTime;
  fn add(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 + rhs.0)
  }
}

impl AddAssign for TicksTime {
  fn add_assign(&mut self, rhs: TicksTime) {
    *self = *self + rhs;
  }
}

impl Sub for TicksTime {
  type Output = TicksTime;
  fn sub(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 - min(self.0, rhs.0))
  }
}

impl SubAssign for TicksTime {
  fn sub_assign(&mut self, rhs: TicksTime) {
    *self = *self - rhs;
  }
}

impl Mul<u64> for TicksTime {
  type Output = TicksTime;
  fn mul(self, rhs: u64) -> Self {
    TicksTime::new(self.0 * rhs)
  }
}

impl Div<u64> for TicksTime {
  type Output = TicksTime;
  fn div(self, rhs: u64) -> Self {
    TicksTime::new(self.0 / rhs)
  }
}

impl From<TicksTime> for f64 {
  fn from(item: TicksTime) -> Self {
    item.0 as f64
  }
}

impl From<TicksTime> for u64 {
  fn from(item: TicksTime) -> Self {
    item.0
  }
}

impl From<u64> for TicksTime {
  fn from(item: u64) -> Self {
    TicksTime(item)
  }
}

impl fmt::Display for TicksTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for TicksTime {
  type Err = TimeError;

  fn from_str(input: &str) -> TimeResult<TicksTime> {
    input
      .parse::<u64>()
      .map(TicksTime::new)
      .map_err(|_| TimeError::Parse {
        kind: "ticks",
        input: input.to_string(),
      })
  }
}
