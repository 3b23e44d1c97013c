pub const MICROS_PER_MINUTE: f64 = 60_000_000.0;

pub const DEFAULT_TEMPO: u32 = 500_000; // 120 BPM

///! Tempo as microseconds per quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo(u32);

impl Tempo {
  pub fn new(micros_per_quarter_note: u32) -> Tempo {
    assert!(micros_per_quarter_note > 0);
    Tempo(micros_per_quarter_note)
  }

  pub fn from_bpm(beats_per_minute: f64) -> Tempo {
    Tempo::new((MICROS_PER_MINUTE / beats_per_minute).round() as u32)
  }

  pub fn get_value(&self) -> u32 {
    self.0
  }

  pub fn to_bpm(&self) -> f64 {
    MICROS_PER_MINUTE / f64::from(self.0)
  }
}

impl Default for Tempo {
  fn default() -> Tempo {
    Tempo(DEFAULT_TEMPO)
  }
}

impl From<Tempo> for f64 {
  fn from(item: Tempo) -> Self {
    f64::from(item.0)
  }
}

impl From<Tempo> for u64 {
  fn from(item: Tempo) -> Self {
    u64::from(item.0)
  }
}

impl From<Tempo> for u32 {
  fn from(item: Tempo) -> Self {
    item.0
  }
}
