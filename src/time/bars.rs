use std::{fmt, ops::Add, str::FromStr};

use crate::time::{round_scale, TimeError, TimeResult};

///! Musical time span as bars, beats and native ticks under the locally
///! active time signature.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct BarsTime {
  bars: u64,
  beats: u64,
  ticks: u64,
}

impl BarsTime {
  pub fn new(bars: u64, beats: u64, ticks: u64) -> BarsTime {
    BarsTime { bars, beats, ticks }
  }

  pub fn zero() -> BarsTime {
    BarsTime {
      bars: 0,
      beats: 0,
      ticks: 0,
    }
  }

  pub fn get_bars(&self) -> u64 {
    self.bars
  }

  pub fn get_beats(&self) -> u64 {
    self.beats
  }

  pub fn get_ticks(&self) -> u64 {
    self.ticks
  }

  pub fn is_zero(&self) -> bool {
    self.bars == 0 && self.beats == 0 && self.ticks == 0
  }

  pub fn checked_sub(self, rhs: BarsTime) -> TimeResult<BarsTime> {
    match (
      self.bars.checked_sub(rhs.bars),
      self.beats.checked_sub(rhs.beats),
      self.ticks.checked_sub(rhs.ticks),
    ) {
      (Some(bars), Some(beats), Some(ticks)) => Ok(BarsTime::new(bars, beats, ticks)),
      _ => Err(TimeError::NegativeTimeSpan),
    }
  }

  pub fn multiply(self, multiplier: f64) -> TimeResult<BarsTime> {
    if multiplier < 0.0 {
      return Err(TimeError::InvalidMultiplier { multiplier });
    }
    Ok(BarsTime::new(
      round_scale(self.bars, multiplier),
      round_scale(self.beats, multiplier),
      round_scale(self.ticks, multiplier),
    ))
  }

  pub fn divide(self, divisor: f64) -> TimeResult<BarsTime> {
    if divisor <= 0.0 {
      return Err(TimeError::InvalidDivisor { divisor });
    }
    Ok(BarsTime::new(
      round_scale(self.bars, 1.0 / divisor),
      round_scale(self.beats, 1.0 / divisor),
      round_scale(self.ticks, 1.0 / divisor),
    ))
  }
}

impl Add for BarsTime {
  type Output = BarsTime;

  fn add(self, rhs: BarsTime) -> BarsTime {
    BarsTime::new(
      self.bars + rhs.bars,
      self.beats + rhs.beats,
      self.ticks + rhs.ticks,
    )
  }
}

impl fmt::Display for BarsTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}.{}.{}", self.bars, self.beats, self.ticks)
  }
}

impl FromStr for BarsTime {
  type Err = TimeError;

  fn from_str(input: &str) -> TimeResult<BarsTime> {
    let parse_error = || TimeError::Parse {
      kind: "bars",
      input: input.to_string(),
    };

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
      return Err(parse_error());
    }

    let bars = parts[0].parse::<u64>().map_err(|_| parse_error())?;
    let beats = parts[1].parse::<u64>().map_err(|_| parse_error())?;
    let ticks = parts[2].parse::<u64>().map_err(|_| parse_error())?;
    Ok(BarsTime::new(bars, beats, ticks))
  }
}
