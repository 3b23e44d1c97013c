use crate::tempo_map::TempoMap;
use crate::time::{BarsTime, TicksTime};
use crate::timespan::convert::{split_components, ticks_per_quarter_note};
use crate::timespan::TimeSpanResult;

/// Converts the tick interval `[time, time + time_span)` into bars, beats
/// and native ticks.
///
/// Same segment walk as the beat converter, but bars stay a distinct output
/// component, so the end merges are observable here: leftover beats from
/// both ends may complete a bar and leftover ticks may complete a beat. The
/// tick remainder stays in native tick units.
pub fn to_bars(
  time_span: TicksTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<BarsTime> {
  let ticks_per_quarter = ticks_per_quarter_note(tempo_map)?;
  if time_span == TicksTime::zero() {
    return Ok(BarsTime::zero());
  }

  let start = u64::from(time);
  let end = start + u64::from(time_span);

  Ok(tempo_map.signature_segments(ticks_per_quarter, |cache| {
    let changes = cache.segments_within(start, end);

    // Whole bars between consecutive signature changes
    let mut bars = 0;
    for pair in changes.windows(2) {
      bars += (pair[1].time - pair[0].time) / pair[0].bar_length;
    }

    let first_time = changes.first().map(|segment| segment.time).unwrap_or(start);
    let last_time = changes.last().map(|segment| segment.time).unwrap_or(start);

    let first_segment = cache.segment_at(start);
    let last_segment = cache.segment_at(last_time);

    let (bars_before, beats_before, ticks_before) =
      split_components(first_time - start, first_segment);
    let (bars_after, beats_after, ticks_after) = split_components(end - last_time, last_segment);

    bars += bars_before + bars_after;

    // Try to complete a bar
    let mut beats = beats_before + beats_after;
    if beats_before > 0 && beats >= first_segment.numerator {
      bars += 1;
      beats -= first_segment.numerator;
    }

    // Try to complete a beat
    let mut ticks = ticks_before + ticks_after;
    if ticks_before > 0 && ticks >= first_segment.beat_length {
      beats += 1;
      ticks -= first_segment.beat_length;
    }

    BarsTime::new(bars, beats, ticks)
  }))
}

/// The inverse walk: a naive tick total under the signature active at
/// `time`, with the bar, beat and tick components rebalanced against the
/// first signature change the interval crosses. As with beats, round trips
/// are only exact across at most one change.
pub fn from_bars(
  bars_time: BarsTime,
  time: TicksTime,
  tempo_map: &TempoMap,
) -> TimeSpanResult<TicksTime> {
  let ticks_per_quarter = ticks_per_quarter_note(tempo_map)?;
  if bars_time.is_zero() {
    return Ok(TicksTime::zero());
  }

  let start = u64::from(time);

  Ok(tempo_map.signature_segments(ticks_per_quarter, |cache| {
    let start_segment = cache.segment_at(start);

    let total_ticks = bars_time.get_bars() * start_segment.bar_length
      + bars_time.get_beats() * start_segment.beat_length
      + bars_time.get_ticks();

    let changes = cache.segments_within(start, start + total_ticks);
    let last_time = changes.first().map(|segment| segment.time).unwrap_or(start);

    let (bars_before, beats_before, ticks_before) =
      split_components(last_time - start, start_segment);

    let bars = bars_time.get_bars() as i64;
    let beats = bars_time.get_beats() as i64;
    let ticks = bars_time.get_ticks() as i64;
    let bars_before = bars_before as i64;
    let mut beats_before = beats_before as i64;
    let mut ticks_before = ticks_before as i64;
    let mut last_time = last_time as i64;

    if bars == bars_before && beats == beats_before && ticks == ticks_before {
      return TicksTime::new((last_time - start as i64).max(0) as u64);
    }

    // Balance bars
    let mut last_bar_length = 0i64;
    let mut last_beat_length = 0i64;
    if bars_before < bars {
      let segment = cache.segment_at(last_time as u64);
      last_bar_length = segment.bar_length as i64;
      last_beat_length = segment.beat_length as i64;
      last_time += (bars - bars_before) * last_bar_length;
    }

    // Balance beats
    if beats_before > beats && last_bar_length > 0 {
      last_time +=
        -last_bar_length + (start_segment.numerator as i64 - beats_before) * last_beat_length;
      beats_before = 0;
    }
    if beats_before < beats {
      last_beat_length = cache.segment_at(last_time as u64).beat_length as i64;
      last_time += (beats - beats_before) * last_beat_length;
    }

    // Balance ticks
    if ticks_before > ticks && last_beat_length > 0 {
      last_time += -last_beat_length + start_segment.beat_length as i64 - ticks_before;
      ticks_before = 0;
    }
    if ticks_before < ticks {
      last_time += ticks - ticks_before;
    }

    TicksTime::new((last_time - start as i64).max(0) as u64)
  }))
}
