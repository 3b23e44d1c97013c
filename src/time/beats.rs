use std::{fmt, ops::Add, str::FromStr};

use crate::time::{round_scale, TimeError, TimeResult};

///! Musical time span as beats plus quarter note denominated ticks.
///!
///! The ticks component counts quarter note ticks; converters rescale it
///! to the locally active beat length when touching a tempo map.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct BeatsTime {
  beats: u64,
  ticks: u64,
}

impl BeatsTime {
  pub fn new(beats: u64, ticks: u64) -> BeatsTime {
    BeatsTime { beats, ticks }
  }

  pub fn zero() -> BeatsTime {
    BeatsTime { beats: 0, ticks: 0 }
  }

  pub fn get_beats(&self) -> u64 {
    self.beats
  }

  pub fn get_ticks(&self) -> u64 {
    self.ticks
  }

  pub fn is_zero(&self) -> bool {
    self.beats == 0 && self.ticks == 0
  }

  pub fn checked_sub(self, rhs: BeatsTime) -> TimeResult<BeatsTime> {
    match (
      self.beats.checked_sub(rhs.beats),
      self.ticks.checked_sub(rhs.ticks),
    ) {
      (Some(beats), Some(ticks)) => Ok(BeatsTime::new(beats, ticks)),
      _ => Err(TimeError::NegativeTimeSpan),
    }
  }

  pub fn multiply(self, multiplier: f64) -> TimeResult<BeatsTime> {
    if multiplier < 0.0 {
      return Err(TimeError::InvalidMultiplier { multiplier });
    }
    Ok(BeatsTime::new(
      round_scale(self.beats, multiplier),
      round_scale(self.ticks, multiplier),
    ))
  }

  pub fn divide(self, divisor: f64) -> TimeResult<BeatsTime> {
    if divisor <= 0.0 {
      return Err(TimeError::InvalidDivisor { divisor });
    }
    Ok(BeatsTime::new(
      round_scale(self.beats, 1.0 / divisor),
      round_scale(self.ticks, 1.0 / divisor),
    ))
  }
}

impl Add for BeatsTime {
  type Output = BeatsTime;

  fn add(self, rhs: BeatsTime) -> BeatsTime {
    BeatsTime::new(self.beats + rhs.beats, self.ticks + rhs.ticks)
  }
}

impl fmt::Display for BeatsTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}.{}", self.beats, self.ticks)
  }
}

impl FromStr for BeatsTime {
  type Err = TimeError;

  fn from_str(input: &str) -> TimeResult<BeatsTime> {
    let parse_error = || TimeError::Parse {
      kind: "beats",
      input: input.to_string(),
    };

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 2 {
      return Err(parse_error());
    }

    let beats = parts[0].parse::<u64>().map_err(|_| parse_error())?;
    let ticks = parts[1].parse::<u64>().map_err(|_| parse_error())?;
    Ok(BeatsTime::new(beats, ticks))
  }
}
