use crate::tempo_map::TempoMap;
use crate::time::{round_div, BeatsTime, TicksTime};
use crate::timespan::convert::{split_components, ticks_per_quarter_note};
use crate::timespan::TimeSpanResult;

/// Converts the tick interval `[time, time + time_span)` into beats plus
/// quarter note denominated ticks.
///
/// Whole bars between signature changes are folded into the beat total
/// through each segment's beats per bar; the leftover tick components at
/// both ends are merged and the final sub-beat remainder is rescaled from
/// the local beat length into quarter note units, rounding half away from
/// zero.
pub fn to_beats(
  time_span: TicksTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<BeatsTime> {
  let ticks_per_quarter = ticks_per_quarter_note(tempo_map)?;
  if time_span == TicksTime::zero() {
    return Ok(BeatsTime::zero());
  }

  let start = u64::from(time);
  let end = start + u64::from(time_span);

  Ok(tempo_map.signature_segments(ticks_per_quarter, |cache| {
    let changes = cache.segments_within(start, end);

    // Whole bars between consecutive signature changes
    let mut total_beats = 0;
    for pair in changes.windows(2) {
      let bar_count = (pair[1].time - pair[0].time) / pair[0].bar_length;
      total_beats += bar_count * pair[0].numerator;
    }

    // Leftovers before the first change and after the last one
    let first_time = changes.first().map(|segment| segment.time).unwrap_or(start);
    let last_time = changes.last().map(|segment| segment.time).unwrap_or(start);

    let first_segment = cache.segment_at(start);
    let last_segment = cache.segment_at(last_time);

    let (bars_before, beats_before, ticks_before) =
      split_components(first_time - start, first_segment);
    let (bars_after, beats_after, ticks_after) = split_components(end - last_time, last_segment);

    total_beats += bars_before * first_segment.numerator + bars_after * last_segment.numerator;
    total_beats += beats_before + beats_after;

    // Completing a bar from the merged leftover beats folds through beats
    // per bar and leaves the beat total unchanged, so only the merged ticks
    // can still complete a beat.
    let mut ticks = ticks_before + ticks_after;
    if ticks > 0 {
      let beat_length = first_segment.beat_length;
      if ticks_before > 0 && ticks >= beat_length {
        total_beats += 1;
        ticks -= beat_length;
      }
      ticks = round_div(ticks * u64::from(ticks_per_quarter), beat_length);
    }

    BeatsTime::new(total_beats, ticks)
  }))
}

/// The inverse walk: a naive tick total under the signature active at
/// `time`, rebalanced against the first signature change it crosses.
///
/// With more than one signature change inside the resulting interval the
/// rebalancing stops after the first one, so round trips are only exact for
/// spans crossing at most one change.
pub fn from_beats(
  beats_time: BeatsTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TicksTime> {
  let ticks_per_quarter = ticks_per_quarter_note(tempo_map)?;
  if beats_time.is_zero() {
    return Ok(TicksTime::zero());
  }

  let start = u64::from(time);

  Ok(tempo_map.signature_segments(ticks_per_quarter, |cache| {
    let start_segment = cache.segment_at(start);
    let start_beat_length = start_segment.beat_length;

    // The ticks component is denominated in quarter note units; bring it
    // into the start signature's beat length with the same rounding as the
    // forward direction.
    let ticks = round_div(
      beats_time.get_ticks() * start_beat_length,
      u64::from(ticks_per_quarter),
    );
    let total_ticks = beats_time.get_beats() * start_beat_length + ticks;

    let changes = cache.segments_within(start, start + total_ticks);
    let last_time = changes.first().map(|segment| segment.time).unwrap_or(start);

    let (bars_before, beats_before, ticks_before) =
      split_components(last_time - start, start_segment);

    let beats = beats_time.get_beats() as i64 - (bars_before * start_segment.numerator) as i64;
    let beats_before = beats_before as i64;
    let ticks = ticks as i64;
    let mut ticks_before = ticks_before as i64;
    let mut last_time = last_time as i64;

    if beats == beats_before && ticks == ticks_before {
      return TicksTime::new((last_time - start as i64).max(0) as u64);
    }

    // Balance beats
    let mut last_beat_length = 0i64;
    if beats_before < beats {
      last_beat_length = cache.segment_at(last_time as u64).beat_length as i64;
      last_time += (beats - beats_before) * last_beat_length;
    }

    // Balance ticks
    if ticks_before > ticks && last_beat_length > 0 {
      last_time += -last_beat_length + start_beat_length as i64 - ticks_before;
      ticks_before = 0;
    }
    if ticks_before < ticks {
      last_time += ticks - ticks_before;
    }

    TicksTime::new((last_time - start as i64).max(0) as u64)
  }))
}
