pub mod cache;
pub mod value_line;

pub use self::value_line::{ValueChange, ValueLine};

use std::cell::RefCell;

use log::trace;

use self::cache::{MetricTimesCache, SignatureSegmentsCache};
use crate::time::{Signature, Tempo, TicksTime, TimeDivision};

///! Tempo map of a MIDI file: the time division plus the tempo and time
///! signature change lines, with lazily rebuilt derived value caches.
///!
///! The map owns both lines exclusively. Conversions are pure reads and must
///! not overlap a mutation; the caches live behind a `RefCell`, so the map is
///! meant for single threaded, read mostly use after it has been populated.
#[derive(Debug)]
pub struct TempoMap {
  division: TimeDivision,
  tempo_line: ValueLine<Tempo>,
  signature_line: ValueLine<Signature>,
  caches: RefCell<Caches>,
}

#[derive(Debug, Default)]
struct Caches {
  metric_times: Option<MetricTimesCache>,
  signature_segments: Option<SignatureSegmentsCache>,
}

impl TempoMap {
  pub fn new(division: TimeDivision) -> TempoMap {
    TempoMap {
      division,
      tempo_line: ValueLine::new(Tempo::default()),
      signature_line: ValueLine::new(Signature::default()),
      caches: RefCell::new(Caches::default()),
    }
  }

  pub fn with_tempo(mut self, tempo: Tempo) -> TempoMap {
    self.tempo_line.set_value(TicksTime::zero(), tempo);
    self
  }

  pub fn with_signature(mut self, signature: Signature) -> TempoMap {
    self.signature_line.set_value(TicksTime::zero(), signature);
    self
  }

  pub fn get_time_division(&self) -> TimeDivision {
    self.division
  }

  pub fn tempo_at(&self, time: TicksTime) -> Tempo {
    self.tempo_line.value_at_time(time)
  }

  pub fn signature_at(&self, time: TicksTime) -> Signature {
    self.signature_line.value_at_time(time)
  }

  pub fn set_tempo(&mut self, time: TicksTime, tempo: Tempo) {
    self.tempo_line.set_value(time, tempo);
  }

  pub fn set_signature(&mut self, time: TicksTime, signature: Signature) {
    self.signature_line.set_value(time, signature);
  }

  pub fn tempo_line(&self) -> &ValueLine<Tempo> {
    &self.tempo_line
  }

  pub fn signature_line(&self) -> &ValueLine<Signature> {
    &self.signature_line
  }

  /// Mirrors both lines about `center`, for playing a span of the map
  /// backwards. Defined for maps whose change points lie within
  /// `[0, 2 * center]`; points beyond that range are discarded.
  pub fn flip(&self, center: TicksTime) -> TempoMap {
    TempoMap {
      division: self.division,
      tempo_line: self.tempo_line.reverse(center),
      signature_line: self.signature_line.reverse(center),
      caches: RefCell::new(Caches::default()),
    }
  }

  pub(crate) fn metric_times<R, F>(&self, f: F) -> R
  where
    F: FnOnce(&MetricTimesCache) -> R,
  {
    let mut caches = self.caches.borrow_mut();
    let stale = caches
      .metric_times
      .as_ref()
      .map_or(true, |cache| cache.version() != self.tempo_line.version());
    if stale {
      trace!("rebuilding the metric times cache");
      caches.metric_times = Some(MetricTimesCache::build(&self.tempo_line));
    }
    f(caches.metric_times.as_ref().unwrap())
  }

  pub(crate) fn signature_segments<R, F>(&self, ticks_per_quarter_note: u16, f: F) -> R
  where
    F: FnOnce(&SignatureSegmentsCache) -> R,
  {
    let mut caches = self.caches.borrow_mut();
    let stale = caches
      .signature_segments
      .as_ref()
      .map_or(true, |cache| cache.version() != self.signature_line.version());
    if stale {
      trace!("rebuilding the signature segments cache");
      caches.signature_segments = Some(SignatureSegmentsCache::build(
        &self.signature_line,
        ticks_per_quarter_note,
      ));
    }
    f(caches.signature_segments.as_ref().unwrap())
  }
}

impl Default for TempoMap {
  fn default() -> TempoMap {
    TempoMap::new(TimeDivision::default())
  }
}

impl Clone for TempoMap {
  fn clone(&self) -> TempoMap {
    let mut tempo_line = ValueLine::new(self.tempo_line.get_default_value());
    tempo_line.replace_values(&self.tempo_line);
    let mut signature_line = ValueLine::new(self.signature_line.get_default_value());
    signature_line.replace_values(&self.signature_line);

    TempoMap {
      division: self.division,
      tempo_line,
      signature_line,
      caches: RefCell::new(Caches::default()),
    }
  }
}
