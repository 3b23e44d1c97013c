pub mod bars;
pub mod beats;
pub mod division;
pub mod metric;
pub mod signature;
pub mod tempo;
pub mod ticks;

pub use self::bars::BarsTime;
pub use self::beats::BeatsTime;
pub use self::division::TimeDivision;
pub use self::metric::MetricTime;
pub use self::signature::Signature;
pub use self::tempo::Tempo;
pub use self::ticks::TicksTime;

use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum TimeError {
  #[fail(display = "Subtraction would produce a negative time span")]
  NegativeTimeSpan,

  #[fail(display = "Multiplier is negative: {}", multiplier)]
  InvalidMultiplier { multiplier: f64 },

  #[fail(display = "Divisor is zero or negative: {}", divisor)]
  InvalidDivisor { divisor: f64 },

  #[fail(display = "Failed to parse {} from {:?}", kind, input)]
  Parse { kind: &'static str, input: String },
}

pub type TimeResult<T> = Result<T, TimeError>;

// Round half away from zero. Operands are non-negative so the integer form
// matches f64::round.
pub(crate) fn round_div(numerator: u64, denominator: u64) -> u64 {
  (numerator + denominator / 2) / denominator
}

pub(crate) fn round_scale(value: u64, factor: f64) -> u64 {
  (value as f64 * factor).round() as u64
}
