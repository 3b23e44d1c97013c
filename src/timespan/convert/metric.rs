use crate::tempo_map::TempoMap;
use crate::time::{MetricTime, TicksTime};
use crate::timespan::convert::ticks_per_quarter_note;
use crate::timespan::TimeSpanResult;

/// Converts the tick interval `[time, time + time_span)` into microseconds,
/// accumulating each tempo segment it crosses. The cache keeps exact
/// `ticks * tempo` numerators, so the division by the ticks per quarter note
/// rounds exactly once.
pub fn to_metric(
  time_span: TicksTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<MetricTime> {
  let ticks_per_quarter = u128::from(ticks_per_quarter_note(tempo_map)?);
  let start = u64::from(time);
  let end = start + u64::from(time_span);

  Ok(tempo_map.metric_times(|cache| {
    let numerator = cache.numerator_at(end) - cache.numerator_at(start);
    MetricTime::new(((numerator + ticks_per_quarter / 2) / ticks_per_quarter) as u64)
  }))
}

/// The inverse: finds the tick position whose elapsed microseconds from
/// `time` match the given metric span, rounding once within the target tempo
/// segment.
pub fn from_metric(
  metric_time: MetricTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TicksTime> {
  let ticks_per_quarter = u128::from(ticks_per_quarter_note(tempo_map)?);
  let start = u64::from(time);

  Ok(tempo_map.metric_times(|cache| {
    let target = cache.numerator_at(start) + u128::from(metric_time.micros()) * ticks_per_quarter;
    TicksTime::new(cache.time_at_numerator(target) - start)
  }))
}

#[cfg(test)]
mod test {

  use super::{from_metric, to_metric};
  use crate::tempo_map::TempoMap;
  use crate::time::{MetricTime, Tempo, TicksTime, TimeDivision};

  fn two_tempo_map() -> TempoMap {
    let mut map = TempoMap::default();
    map.set_tempo(TicksTime::new(96), Tempo::new(250_000));
    map
  }

  #[test]
  pub fn quarter_note_at_default_tempo() {
    let map = TempoMap::default();
    let metric = to_metric(TicksTime::new(96), TicksTime::zero(), &map).unwrap();
    assert_eq!(metric, MetricTime::new(500_000));
  }

  #[test]
  pub fn zero_span() {
    let map = TempoMap::default();
    let metric = to_metric(TicksTime::zero(), TicksTime::new(50), &map).unwrap();
    assert_eq!(metric, MetricTime::zero());
  }

  #[test]
  pub fn accumulates_across_tempo_changes() {
    let map = two_tempo_map();

    // 96 ticks at 500000 us/quarter plus 96 ticks at 250000 us/quarter
    let metric = to_metric(TicksTime::new(192), TicksTime::zero(), &map).unwrap();
    assert_eq!(metric, MetricTime::new(750_000));
  }

  #[test]
  pub fn span_not_anchored_at_zero() {
    let map = two_tempo_map();

    let metric = to_metric(TicksTime::new(96), TicksTime::new(48), &map).unwrap();
    assert_eq!(metric, MetricTime::new(250_000 + 125_000));
  }

  #[test]
  pub fn from_metric_inverts() {
    let map = two_tempo_map();

    let ticks = from_metric(MetricTime::new(750_000), TicksTime::zero(), &map).unwrap();
    assert_eq!(ticks, TicksTime::new(192));

    let ticks = from_metric(MetricTime::new(375_000), TicksTime::new(48), &map).unwrap();
    assert_eq!(ticks, TicksTime::new(96));
  }

  #[test]
  pub fn round_trips_at_every_anchor() {
    let map = two_tempo_map();
    for start in &[0u64, 48, 96, 100] {
      for span in &[0u64, 1, 95, 96, 97, 500] {
        let metric =
          to_metric(TicksTime::new(*span), TicksTime::new(*start), &map).unwrap();
        let ticks = from_metric(metric, TicksTime::new(*start), &map).unwrap();
        assert_eq!(ticks, TicksTime::new(*span));
      }
    }
  }

  #[test]
  pub fn smpte_division_is_unsupported() {
    let map = TempoMap::new(TimeDivision::SmpteFrames {
      frames_per_second: 25,
      ticks_per_frame: 40,
    });
    assert!(to_metric(TicksTime::new(96), TicksTime::zero(), &map).is_err());
    assert!(from_metric(MetricTime::new(500_000), TicksTime::zero(), &map).is_err());
  }
}
