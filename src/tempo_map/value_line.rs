use log::warn;

use crate::time::TicksTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange<V> {
  time: TicksTime,
  value: V,
}

impl<V: Copy> ValueChange<V> {
  pub fn new(time: TicksTime, value: V) -> ValueChange<V> {
    ValueChange { time, value }
  }

  pub fn get_time(&self) -> TicksTime {
    self.time
  }

  pub fn get_value(&self) -> V {
    self.value
  }
}

///! Step function over tick time: an ordered set of change points unique by
///! time, with an implicit default value before the first change.
#[derive(Debug, Clone)]
pub struct ValueLine<V> {
  default_value: V,
  changes: Vec<ValueChange<V>>,
  version: u64,
}

impl<V: Copy> ValueLine<V> {
  pub fn new(default_value: V) -> ValueLine<V> {
    ValueLine {
      default_value,
      changes: Vec::new(),
      version: 0,
    }
  }

  pub fn get_default_value(&self) -> V {
    self.default_value
  }

  /// Value of the change with the greatest time not after `time`, falling
  /// back to the default value.
  pub fn value_at_time(&self, time: TicksTime) -> V {
    self
      .changes
      .iter()
      .rev()
      .find(|change| change.time <= time)
      .map(|change| change.value)
      .unwrap_or(self.default_value)
  }

  /// Inserts a change point, overwriting any change already at `time`.
  pub fn set_value(&mut self, time: TicksTime, value: V) {
    match self.changes.binary_search_by(|change| change.time.cmp(&time)) {
      Ok(index) => self.changes[index].value = value,
      Err(index) => self.changes.insert(index, ValueChange::new(time, value)),
    }
    self.version += 1;
  }

  /// All change points in ascending time order. The implicit default is not
  /// included unless a value was explicitly set at time zero.
  pub fn changes(&self) -> impl Iterator<Item = &ValueChange<V>> {
    self.changes.iter()
  }

  /// Change points strictly inside the open interval `(start, end)`.
  pub fn changes_between(
    &self,
    start: TicksTime,
    end: TicksTime,
  ) -> impl Iterator<Item = &ValueChange<V>> {
    self
      .changes
      .iter()
      .skip_while(move |change| change.time <= start)
      .take_while(move |change| change.time < end)
  }

  pub fn replace_values(&mut self, other: &ValueLine<V>) {
    self.default_value = other.default_value;
    self.changes = other.changes.clone();
    self.version += 1;
  }

  /// Mirrors every change point about `center`: a change at time t moves to
  /// `2 * center - t`. The resulting line plays the original values back to
  /// front. Change points beyond `2 * center` cannot be mirrored into
  /// non-negative time and are discarded.
  pub fn reverse(&self, center: TicksTime) -> ValueLine<V> {
    let max_time = center + center;

    let kept: Vec<&ValueChange<V>> = self
      .changes
      .iter()
      .take_while(|change| change.time <= max_time)
      .collect();

    let discarded = self.changes.len() - kept.len();
    if discarded > 0 {
      warn!(
        "reverse: discarded {} change point(s) beyond tick {}",
        discarded,
        u64::from(max_time)
      );
    }

    let default_value = kept
      .last()
      .map(|change| change.value)
      .unwrap_or(self.default_value);

    // A reversed step function holds, after each mirrored change point, the
    // value that was active just before the original one.
    let mut changes = Vec::with_capacity(kept.len());
    for (index, change) in kept.iter().enumerate() {
      let previous_value = if index == 0 {
        self.default_value
      } else {
        kept[index - 1].value
      };
      changes.push(ValueChange::new(max_time - change.time, previous_value));
    }
    changes.reverse();

    ValueLine {
      default_value,
      changes,
      version: 0,
    }
  }

  pub(crate) fn version(&self) -> u64 {
    self.version
  }
}

#[cfg(test)]
mod test {

  use super::ValueLine;
  use crate::time::TicksTime;

  #[test]
  pub fn value_at_time_defaults() {
    let line: ValueLine<u32> = ValueLine::new(7);
    assert_eq!(line.value_at_time(TicksTime::zero()), 7);
    assert_eq!(line.value_at_time(TicksTime::new(1000)), 7);
  }

  #[test]
  pub fn value_at_time_step_function() {
    let mut line = ValueLine::new(7);
    line.set_value(TicksTime::new(100), 8);
    line.set_value(TicksTime::new(200), 9);

    assert_eq!(line.value_at_time(TicksTime::new(99)), 7);
    assert_eq!(line.value_at_time(TicksTime::new(100)), 8);
    assert_eq!(line.value_at_time(TicksTime::new(199)), 8);
    assert_eq!(line.value_at_time(TicksTime::new(200)), 9);
    assert_eq!(line.value_at_time(TicksTime::new(5000)), 9);
  }

  #[test]
  pub fn set_value_overwrites() {
    let mut line = ValueLine::new(7);
    line.set_value(TicksTime::new(100), 8);
    line.set_value(TicksTime::new(100), 9);

    assert_eq!(line.value_at_time(TicksTime::new(100)), 9);
    assert_eq!(line.changes().count(), 1);
  }

  #[test]
  pub fn set_value_keeps_changes_sorted() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(200), 2);
    line.set_value(TicksTime::new(100), 1);

    let times: Vec<u64> = line.changes().map(|c| u64::from(c.get_time())).collect();
    assert_eq!(times, vec![100, 200]);
  }

  #[test]
  pub fn changes_between_is_strict() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(100), 1);
    line.set_value(TicksTime::new(200), 2);
    line.set_value(TicksTime::new(300), 3);

    let inside: Vec<u32> = line
      .changes_between(TicksTime::new(100), TicksTime::new(300))
      .map(|c| c.get_value())
      .collect();
    assert_eq!(inside, vec![2]);
  }

  #[test]
  pub fn replace_values() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(100), 1);

    let mut other = ValueLine::new(5);
    other.set_value(TicksTime::new(50), 6);

    line.replace_values(&other);
    assert_eq!(line.get_default_value(), 5);
    assert_eq!(line.value_at_time(TicksTime::new(50)), 6);
    assert_eq!(line.value_at_time(TicksTime::new(100)), 6);
  }

  #[test]
  pub fn reverse_mirrors_change_points() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(100), 1);
    line.set_value(TicksTime::new(300), 2);

    let reversed = line.reverse(TicksTime::new(200));
    let times: Vec<u64> = reversed
      .changes()
      .map(|c| u64::from(c.get_time()))
      .collect();
    assert_eq!(times, vec![100, 300]);

    // Values play back to front
    assert_eq!(reversed.value_at_time(TicksTime::zero()), 2);
    assert_eq!(reversed.value_at_time(TicksTime::new(100)), 1);
    assert_eq!(reversed.value_at_time(TicksTime::new(300)), 0);
  }

  #[test]
  pub fn reverse_discards_points_out_of_range() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(100), 1);
    line.set_value(TicksTime::new(500), 2);

    let reversed = line.reverse(TicksTime::new(200));
    let times: Vec<u64> = reversed
      .changes()
      .map(|c| u64::from(c.get_time()))
      .collect();
    assert_eq!(times, vec![300]);
  }

  #[test]
  pub fn double_reverse_is_identity() {
    let mut line = ValueLine::new(0);
    line.set_value(TicksTime::new(100), 1);
    line.set_value(TicksTime::new(250), 2);
    line.set_value(TicksTime::new(400), 3);

    let center = TicksTime::new(200);
    let restored = line.reverse(center).reverse(center);

    assert_eq!(restored.get_default_value(), 0);
    let changes: Vec<(u64, u32)> = restored
      .changes()
      .map(|c| (u64::from(c.get_time()), c.get_value()))
      .collect();
    assert_eq!(changes, vec![(100, 1), (250, 2), (400, 3)]);
  }

  #[test]
  pub fn mutation_bumps_version() {
    let mut line = ValueLine::new(0);
    let v0 = line.version();
    line.set_value(TicksTime::new(100), 1);
    assert!(line.version() > v0);
  }
}
