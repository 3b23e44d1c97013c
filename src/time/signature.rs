#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
  num_beats: u8,  // numerator
  note_value: u8, // denominator, a power of two
}

impl Signature {
  pub fn new(num_beats: u8, note_value: u8) -> Signature {
    assert!(num_beats > 0);
    assert!(note_value.is_power_of_two());
    Signature {
      num_beats,
      note_value,
    }
  }

  pub fn get_num_beats(&self) -> u8 {
    self.num_beats
  }

  pub fn get_note_value(&self) -> u8 {
    self.note_value
  }

  pub fn beat_length(&self, ticks_per_quarter_note: u16) -> u64 {
    4 * u64::from(ticks_per_quarter_note) / u64::from(self.note_value)
  }

  pub fn bar_length(&self, ticks_per_quarter_note: u16) -> u64 {
    u64::from(self.num_beats) * self.beat_length(ticks_per_quarter_note)
  }
}

impl Default for Signature {
  fn default() -> Signature {
    Signature::new(4, 4)
  }
}
