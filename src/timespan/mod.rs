pub mod convert;
pub mod math;

pub use self::math::{MathOperation, MathTime};

use std::fmt;

use failure::Fail;

use crate::time::{BarsTime, BeatsTime, MetricTime, TicksTime, TimeError, TimeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpanKind {
  Ticks,
  Metric,
  Beats,
  Bars,
  Math,
}

///! Closed union over the supported time span representations.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSpan {
  Ticks(TicksTime),
  Metric(MetricTime),
  Beats(BeatsTime),
  Bars(BarsTime),
  Math(MathTime),
}

impl TimeSpan {
  pub fn kind(&self) -> TimeSpanKind {
    match self {
      TimeSpan::Ticks(_) => TimeSpanKind::Ticks,
      TimeSpan::Metric(_) => TimeSpanKind::Metric,
      TimeSpan::Beats(_) => TimeSpanKind::Beats,
      TimeSpan::Bars(_) => TimeSpanKind::Bars,
      TimeSpan::Math(_) => TimeSpanKind::Math,
    }
  }

  pub fn multiply(&self, multiplier: f64) -> TimeResult<TimeSpan> {
    match self {
      TimeSpan::Ticks(ticks) => ticks.multiply(multiplier).map(TimeSpan::Ticks),
      TimeSpan::Metric(metric) => metric.multiply(multiplier).map(TimeSpan::Metric),
      TimeSpan::Beats(beats) => beats.multiply(multiplier).map(TimeSpan::Beats),
      TimeSpan::Bars(bars) => bars.multiply(multiplier).map(TimeSpan::Bars),
      TimeSpan::Math(math) => math.multiply(multiplier).map(TimeSpan::Math),
    }
  }

  pub fn divide(&self, divisor: f64) -> TimeResult<TimeSpan> {
    match self {
      TimeSpan::Ticks(ticks) => ticks.divide(divisor).map(TimeSpan::Ticks),
      TimeSpan::Metric(metric) => metric.divide(divisor).map(TimeSpan::Metric),
      TimeSpan::Beats(beats) => beats.divide(divisor).map(TimeSpan::Beats),
      TimeSpan::Bars(bars) => bars.divide(divisor).map(TimeSpan::Bars),
      TimeSpan::Math(math) => math.divide(divisor).map(TimeSpan::Math),
    }
  }
}

impl fmt::Display for TimeSpan {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      TimeSpan::Ticks(ticks) => write!(f, "{}", ticks),
      TimeSpan::Metric(metric) => write!(f, "{}", metric),
      TimeSpan::Beats(beats) => write!(f, "{}", beats),
      TimeSpan::Bars(bars) => write!(f, "{}", bars),
      TimeSpan::Math(math) => write!(f, "{}", math),
    }
  }
}

#[derive(Debug, Fail)]
pub enum TimeSpanError {
  #[fail(display = "Time division is not supported for time span conversion")]
  UnsupportedTimeDivision,

  #[fail(display = "No conversion into {:?} time spans", kind)]
  UnsupportedConversion { kind: TimeSpanKind },

  #[fail(display = "{}", _0)]
  Time(#[fail(cause)] TimeError),
}

impl From<TimeError> for TimeSpanError {
  fn from(cause: TimeError) -> TimeSpanError {
    TimeSpanError::Time(cause)
  }
}

pub type TimeSpanResult<T> = Result<T, TimeSpanError>;

/// Parses a time span of any kind, dispatching on the shape of the input:
/// a leading `(` selects the math grammar, a `:` the metric grammar, and
/// otherwise the number of `.` separated fields selects ticks, beats or
/// bars.
pub fn parse(input: &str) -> TimeSpanResult<TimeSpan> {
  let input = input.trim();
  if input.starts_with('(') {
    math::parse_math(input)
  } else if input.contains(':') {
    let metric = input.parse::<MetricTime>()?;
    Ok(TimeSpan::Metric(metric))
  } else {
    let result: TimeResult<TimeSpan> = match input.matches('.').count() {
      0 => input.parse::<TicksTime>().map(TimeSpan::Ticks),
      1 => input.parse::<BeatsTime>().map(TimeSpan::Beats),
      2 => input.parse::<BarsTime>().map(TimeSpan::Bars),
      _ => Err(TimeError::Parse {
        kind: "time span",
        input: input.to_string(),
      }),
    };
    result.map_err(TimeSpanError::from)
  }
}
