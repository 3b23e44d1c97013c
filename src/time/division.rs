pub const DEFAULT_TICKS_PER_QUARTER_NOTE: u16 = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDivision {
  TicksPerQuarterNote(u16),
  SmpteFrames {
    frames_per_second: u8,
    ticks_per_frame: u8,
  },
}

impl TimeDivision {
  pub fn ticks_per_quarter_note(&self) -> Option<u16> {
    match self {
      TimeDivision::TicksPerQuarterNote(ticks) => Some(*ticks),
      TimeDivision::SmpteFrames { .. } => None,
    }
  }
}

impl Default for TimeDivision {
  fn default() -> TimeDivision {
    TimeDivision::TicksPerQuarterNote(DEFAULT_TICKS_PER_QUARTER_NOTE)
  }
}
