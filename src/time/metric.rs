use std::{
  cmp::min,
  fmt,
  ops::{Add, AddAssign, Sub, SubAssign},
  str::FromStr,
};

use crate::time::{round_scale, TimeError, TimeResult};

pub const MICROS_PER_SECOND: u64 = 1_000_000;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
pub const MICROS_PER_MINUTE: u64 = MICROS_PER_SECOND * SECONDS_PER_MINUTE;
pub const MICROS_PER_HOUR: u64 = MICROS_PER_MINUTE * MINUTES_PER_HOUR;

///! Wall clock time span in microseconds
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct MetricTime(u64);

impl MetricTime {
  pub fn new(micros: u64) -> MetricTime {
    MetricTime(micros)
  }

  pub fn zero() -> MetricTime {
    MetricTime(0)
  }

  pub fn from_seconds(seconds: f64) -> MetricTime {
    MetricTime((seconds * MICROS_PER_SECOND as f64).round() as u64)
  }

  pub fn micros(&self) -> u64 {
    self.0
  }

  pub fn to_seconds(&self) -> f64 {
    self.0 as f64 / MICROS_PER_SECOND as f64
  }

  pub fn checked_sub(self, rhs: MetricTime) -> TimeResult<MetricTime> {
    self
      .0
      .checked_sub(rhs.0)
      .map(MetricTime)
      .ok_or(TimeError::NegativeTimeSpan)
  }

  pub fn multiply(self, multiplier: f64) -> TimeResult<MetricTime> {
    if multiplier < 0.0 {
      return Err(TimeError::InvalidMultiplier { multiplier });
    }
    Ok(MetricTime(round_scale(self.0, multiplier)))
  }

  pub fn divide(self, divisor: f64) -> TimeResult<MetricTime> {
    if divisor <= 0.0 {
      return Err(TimeError::InvalidDivisor { divisor });
    }
    Ok(MetricTime(round_scale(self.0, 1.0 / divisor)))
  }
}

impl Add for MetricTime {
  type Output = MetricTime;

  fn add(self, rhs: MetricTime) -> MetricTime {
    MetricTime(self.0 + rhs.0)
  }
}

impl AddAssign for MetricTime {
  fn add_assign(&mut self, rhs: MetricTime) {
    *self = *self + rhs;
  }
}

impl Sub for MetricTime {
  type Output = MetricTime;

  fn sub(self, rhs: MetricTime) -> MetricTime {
    MetricTime(self.0 - min(self.0, rhs.0))
  }
}

impl SubAssign for MetricTime {
  fn sub_assign(&mut self, rhs: MetricTime) {
    *self = *self - rhs;
  }
}

impl From<MetricTime> for u64 {
  fn from(item: MetricTime) -> Self {
    item.0
  }
}

impl fmt::Display for MetricTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let hours = self.0 / MICROS_PER_HOUR;
    let minutes = self.0 % MICROS_PER_HOUR / MICROS_PER_MINUTE;
    let seconds = self.0 % MICROS_PER_MINUTE / MICROS_PER_SECOND;
    let micros = self.0 % MICROS_PER_SECOND;
    write!(f, "{}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros)
  }
}

impl FromStr for MetricTime {
  type Err = TimeError;

  fn from_str(input: &str) -> TimeResult<MetricTime> {
    let parse_error = || TimeError::Parse {
      kind: "metric",
      input: input.to_string(),
    };

    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 3 {
      return Err(parse_error());
    }

    let hours = parts[0].parse::<u64>().map_err(|_| parse_error())?;
    let minutes = parts[1].parse::<u64>().map_err(|_| parse_error())?;

    let mut seconds_parts = parts[2].splitn(2, '.');
    let seconds = seconds_parts
      .next()
      .and_then(|s| s.parse::<u64>().ok())
      .ok_or_else(parse_error)?;

    let micros = match seconds_parts.next() {
      Some(fraction) => {
        if fraction.is_empty()
          || fraction.len() > 6
          || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
          return Err(parse_error());
        }
        let padding = 6 - fraction.len() as u32;
        fraction.parse::<u64>().map_err(|_| parse_error())? * 10u64.pow(padding)
      }
      None => 0,
    };

    if minutes >= MINUTES_PER_HOUR || seconds >= SECONDS_PER_MINUTE {
      return Err(parse_error());
    }

    Ok(MetricTime(
      hours * MICROS_PER_HOUR + minutes * MICROS_PER_MINUTE + seconds * MICROS_PER_SECOND + micros,
    ))
  }
}

#[cfg(test)]
mod test {

  use super::{MetricTime, MICROS_PER_MINUTE, MICROS_PER_SECOND};
  use crate::time::TimeError;

  #[test]
  pub fn new() {
    let time = MetricTime::new(15);
    assert_eq!(time.micros(), 15);
  }

  #[test]
  pub fn zero() {
    let time = MetricTime::zero();
    assert_eq!(time.micros(), 0);
  }

  #[test]
  pub fn from_seconds() {
    let time = MetricTime::from_seconds(1.5);
    assert_eq!(time.micros(), 1_500_000);
  }

  #[test]
  pub fn to_seconds() {
    let time = MetricTime::new(MICROS_PER_SECOND * 2);
    assert_eq!(time.to_seconds(), 2.0);
  }

  #[test]
  pub fn add() {
    let time1 = MetricTime::new(15);
    let time2 = MetricTime::new(5);
    assert_eq!(time1 + time2, MetricTime::new(20));
  }

  #[test]
  pub fn sub_saturates() {
    let time1 = MetricTime::new(15);
    let time2 = MetricTime::new(5);
    assert_eq!(time1 - time2, MetricTime::new(10));
    assert_eq!(time2 - time1, MetricTime::zero());
  }

  #[test]
  pub fn checked_sub() {
    let time1 = MetricTime::new(15);
    let time2 = MetricTime::new(5);
    assert_eq!(time1.checked_sub(time2), Ok(MetricTime::new(10)));
    assert_eq!(time2.checked_sub(time1), Err(TimeError::NegativeTimeSpan));
  }

  #[test]
  pub fn multiply() {
    let time = MetricTime::new(5);
    assert_eq!(time.multiply(0.5), Ok(MetricTime::new(3)));
    assert!(time.multiply(-2.0).is_err());
  }

  #[test]
  pub fn divide() {
    let time = MetricTime::new(3);
    assert_eq!(time.divide(2.0), Ok(MetricTime::new(2)));
    assert!(time.divide(-1.0).is_err());
  }

  #[test]
  pub fn display() {
    let time =
      MetricTime::new(MICROS_PER_MINUTE * 61 + MICROS_PER_SECOND * 2 + 500);
    assert_eq!(time.to_string(), "1:01:02.000500");
  }

  #[test]
  pub fn parse() {
    let time = "1:01:02.000500".parse::<MetricTime>().unwrap();
    assert_eq!(
      time,
      MetricTime::new(MICROS_PER_MINUTE * 61 + MICROS_PER_SECOND * 2 + 500)
    );
  }

  #[test]
  pub fn parse_without_fraction() {
    let time = "0:00:02".parse::<MetricTime>().unwrap();
    assert_eq!(time, MetricTime::new(MICROS_PER_SECOND * 2));
  }

  #[test]
  pub fn parse_short_fraction_pads_right() {
    let time = "0:00:00.5".parse::<MetricTime>().unwrap();
    assert_eq!(time, MetricTime::new(500_000));
  }

  #[test]
  pub fn parse_rejects_malformed() {
    assert!("1:2".parse::<MetricTime>().is_err());
    assert!("0:61:00".parse::<MetricTime>().is_err());
    assert!("0:00:61".parse::<MetricTime>().is_err());
    assert!("0:00:00.1234567".parse::<MetricTime>().is_err());
    assert!("a:00:00".parse::<MetricTime>().is_err());
  }

  #[test]
  pub fn display_parse_round_trip() {
    let time = MetricTime::new(123_456_789);
    assert_eq!(time.to_string().parse::<MetricTime>(), Ok(time));
  }
}
