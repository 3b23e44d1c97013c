use crate::tempo_map::value_line::ValueLine;
use crate::time::{Signature, Tempo, TicksTime};

///! Derived value tables rebuilt lazily from the tempo map lines. Each cache
///! records the line version it was built from; the map compares versions
///! before every use.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint {
  /// Tick of the tempo change starting this segment.
  pub time: u64,
  /// Exact accumulated `sum(segment_ticks * tempo)` up to `time`. Dividing
  /// by the ticks per quarter note yields microseconds, so every conversion
  /// rounds exactly once.
  pub accumulated: u128,
  /// Microseconds per quarter note active from `time`.
  pub tempo: u64,
}

#[derive(Debug, Clone)]
pub struct MetricTimesCache {
  version: u64,
  points: Vec<MetricPoint>,
}

impl MetricTimesCache {
  pub fn build(line: &ValueLine<Tempo>) -> MetricTimesCache {
    let initial = line.value_at_time(TicksTime::zero());
    let mut points = vec![MetricPoint {
      time: 0,
      accumulated: 0,
      tempo: u64::from(initial),
    }];

    for change in line.changes() {
      let time = u64::from(change.get_time());
      if time == 0 {
        continue; // already covered by the initial point
      }
      let last = points[points.len() - 1];
      points.push(MetricPoint {
        time,
        accumulated: last.accumulated + u128::from(time - last.time) * u128::from(last.tempo),
        tempo: u64::from(change.get_value()),
      });
    }

    MetricTimesCache {
      version: line.version(),
      points,
    }
  }

  /// Exact `sum(ticks * tempo)` numerator accumulated from tick zero.
  pub fn numerator_at(&self, time: u64) -> u128 {
    let point = self.point_at(time);
    point.accumulated + u128::from(time - point.time) * u128::from(point.tempo)
  }

  /// Tick position whose accumulated numerator is closest to `numerator`,
  /// rounding half away from zero within the containing tempo segment.
  pub fn time_at_numerator(&self, numerator: u128) -> u64 {
    let index = self
      .points
      .iter()
      .rposition(|point| point.accumulated <= numerator)
      .unwrap_or(0);
    let point = &self.points[index];
    let tempo = u128::from(point.tempo);
    point.time + ((numerator - point.accumulated + tempo / 2) / tempo) as u64
  }

  fn point_at(&self, time: u64) -> &MetricPoint {
    let index = self
      .points
      .iter()
      .rposition(|point| point.time <= time)
      .unwrap_or(0);
    &self.points[index]
  }

  pub(crate) fn version(&self) -> u64 {
    self.version
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureSegment {
  /// Tick of the signature change starting this segment.
  pub time: u64,
  /// Beats per bar.
  pub numerator: u64,
  /// Ticks per beat under this signature.
  pub beat_length: u64,
  /// Ticks per bar under this signature.
  pub bar_length: u64,
}

#[derive(Debug, Clone)]
pub struct SignatureSegmentsCache {
  version: u64,
  segments: Vec<SignatureSegment>,
}

impl SignatureSegmentsCache {
  pub fn build(line: &ValueLine<Signature>, ticks_per_quarter_note: u16) -> SignatureSegmentsCache {
    let initial = line.value_at_time(TicksTime::zero());
    let mut segments = vec![Self::segment(0, initial, ticks_per_quarter_note)];

    for change in line.changes() {
      let time = u64::from(change.get_time());
      if time == 0 {
        continue;
      }
      segments.push(Self::segment(time, change.get_value(), ticks_per_quarter_note));
    }

    SignatureSegmentsCache {
      version: line.version(),
      segments,
    }
  }

  fn segment(time: u64, signature: Signature, ticks_per_quarter_note: u16) -> SignatureSegment {
    SignatureSegment {
      time,
      numerator: u64::from(signature.get_num_beats()),
      beat_length: signature.beat_length(ticks_per_quarter_note),
      bar_length: signature.bar_length(ticks_per_quarter_note),
    }
  }

  /// Segment active at `time`.
  pub fn segment_at(&self, time: u64) -> &SignatureSegment {
    let index = self
      .segments
      .iter()
      .rposition(|segment| segment.time <= time)
      .unwrap_or(0);
    &self.segments[index]
  }

  /// Segments starting strictly inside the open interval `(start, end)`.
  pub fn segments_within(&self, start: u64, end: u64) -> &[SignatureSegment] {
    let low = self
      .segments
      .iter()
      .position(|segment| segment.time > start)
      .unwrap_or(self.segments.len());
    let high = self
      .segments
      .iter()
      .position(|segment| segment.time >= end)
      .unwrap_or(self.segments.len());
    &self.segments[low..high.max(low)]
  }

  pub(crate) fn version(&self) -> u64 {
    self.version
  }
}
