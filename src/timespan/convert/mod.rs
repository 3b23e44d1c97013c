pub mod bars;
pub mod beats;
pub mod metric;

use crate::tempo_map::cache::SignatureSegment;
use crate::tempo_map::TempoMap;
use crate::time::{TicksTime, TimeDivision};
use crate::timespan::{MathOperation, TimeSpan, TimeSpanError, TimeSpanKind, TimeSpanResult};

/// Converts a tick span starting at `time` into the requested
/// representation.
pub fn to_time_span(
  kind: TimeSpanKind,
  time_span: TicksTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TimeSpan> {
  match kind {
    TimeSpanKind::Ticks => Ok(TimeSpan::Ticks(time_span)),
    TimeSpanKind::Metric => metric::to_metric(time_span, time, tempo_map).map(TimeSpan::Metric),
    TimeSpanKind::Beats => beats::to_beats(time_span, time, tempo_map).map(TimeSpan::Beats),
    TimeSpanKind::Bars => bars::to_bars(time_span, time, tempo_map).map(TimeSpan::Bars),
    TimeSpanKind::Math => Err(TimeSpanError::UnsupportedConversion { kind }),
  }
}

/// Converts any representation back into a tick span starting at `time`.
///
/// A math composite resolves its left operand at `time`; for an addition the
/// right operand is then anchored at the left operand's end, for a
/// subtraction both operands are anchored at `time` and the difference must
/// be non-negative.
pub fn to_ticks(
  time_span: &TimeSpan,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TicksTime> {
  match time_span {
    TimeSpan::Ticks(ticks) => Ok(*ticks),
    TimeSpan::Metric(metric) => metric::from_metric(*metric, time, tempo_map),
    TimeSpan::Beats(beats) => beats::from_beats(*beats, time, tempo_map),
    TimeSpan::Bars(bars) => bars::from_bars(*bars, time, tempo_map),
    TimeSpan::Math(math) => match math.get_operation() {
      MathOperation::Add => {
        let lhs = to_ticks(math.get_lhs(), time, tempo_map)?;
        let rhs = to_ticks(math.get_rhs(), time + lhs, tempo_map)?;
        Ok(lhs + rhs)
      }
      MathOperation::Subtract => {
        let lhs = to_ticks(math.get_lhs(), time, tempo_map)?;
        let rhs = to_ticks(math.get_rhs(), time, tempo_map)?;
        lhs.checked_sub(rhs).map_err(TimeSpanError::from)
      }
    },
  }
}

/// Converts a span of any kind into any other kind, through ticks.
pub fn time_span_as(
  time_span: &TimeSpan,
  kind: TimeSpanKind,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TimeSpan> {
  let ticks = to_ticks(time_span, time, tempo_map)?;
  to_time_span(kind, ticks, time, tempo_map)
}

pub(crate) fn ticks_per_quarter_note(tempo_map: &TempoMap) -> TimeSpanResult<u16> {
  match tempo_map.get_time_division() {
    TimeDivision::TicksPerQuarterNote(ticks) => Ok(ticks),
    TimeDivision::SmpteFrames { .. } => Err(TimeSpanError::UnsupportedTimeDivision),
  }
}

/// Splits a raw tick count into whole bars, whole beats and leftover ticks
/// under one signature segment.
pub(crate) fn split_components(total_ticks: u64, segment: &SignatureSegment) -> (u64, u64, u64) {
  let bars = total_ticks / segment.bar_length;
  let remainder = total_ticks % segment.bar_length;
  let beats = remainder / segment.beat_length;
  (bars, beats, remainder % segment.beat_length)
}

#[cfg(test)]
mod test {

  use super::{time_span_as, to_ticks, to_time_span};
  use crate::tempo_map::TempoMap;
  use crate::time::{BeatsTime, MetricTime, TicksTime};
  use crate::timespan::{MathTime, TimeSpan, TimeSpanError, TimeSpanKind};

  #[test]
  pub fn ticks_pass_through() {
    let map = TempoMap::default();
    let span = to_time_span(
      TimeSpanKind::Ticks,
      TicksTime::new(480),
      TicksTime::zero(),
      &map,
    )
    .unwrap();
    assert_eq!(span, TimeSpan::Ticks(TicksTime::new(480)));
    assert_eq!(
      to_ticks(&span, TicksTime::zero(), &map).unwrap(),
      TicksTime::new(480)
    );
  }

  #[test]
  pub fn converting_to_math_is_unsupported() {
    let map = TempoMap::default();
    let result = to_time_span(
      TimeSpanKind::Math,
      TicksTime::new(480),
      TicksTime::zero(),
      &map,
    );
    match result {
      Err(TimeSpanError::UnsupportedConversion { kind }) => {
        assert_eq!(kind, TimeSpanKind::Math)
      }
      _ => panic!("expected an unsupported conversion error"),
    }
  }

  #[test]
  pub fn math_addition_anchors_the_rhs_at_the_lhs_end() {
    let map = TempoMap::default();
    let span = TimeSpan::Math(MathTime::add(
      TimeSpan::Beats(BeatsTime::new(1, 0)),
      TimeSpan::Metric(MetricTime::new(500_000)),
    ));

    // one beat (96 ticks) plus half a second at 120 BPM (96 ticks)
    let ticks = to_ticks(&span, TicksTime::zero(), &map).unwrap();
    assert_eq!(ticks, TicksTime::new(192));
  }

  #[test]
  pub fn math_subtraction_fails_when_negative() {
    let map = TempoMap::default();
    let span = TimeSpan::Math(MathTime::subtract(
      TimeSpan::Ticks(TicksTime::new(96)),
      TimeSpan::Beats(BeatsTime::new(2, 0)),
    ));
    assert!(to_ticks(&span, TicksTime::zero(), &map).is_err());
  }

  #[test]
  pub fn math_subtraction() {
    let map = TempoMap::default();
    let span = TimeSpan::Math(MathTime::subtract(
      TimeSpan::Beats(BeatsTime::new(2, 0)),
      TimeSpan::Ticks(TicksTime::new(96)),
    ));
    assert_eq!(
      to_ticks(&span, TicksTime::zero(), &map).unwrap(),
      TicksTime::new(96)
    );
  }

  #[test]
  pub fn cross_kind_conversion_goes_through_ticks() {
    let map = TempoMap::default();
    let metric = TimeSpan::Metric(MetricTime::new(500_000));
    let beats = time_span_as(&metric, TimeSpanKind::Beats, TicksTime::zero(), &map).unwrap();
    assert_eq!(beats, TimeSpan::Beats(BeatsTime::new(1, 0)));
  }
}
