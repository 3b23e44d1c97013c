use failure::{Error, Fail};

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::tempo_map::TempoMap;
use crate::time::{Signature, Tempo, TicksTime, TimeDivision};

#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
  #[fail(display = "Tempo must be positive")]
  InvalidTempo,

  #[fail(display = "Time signature numerator must be positive")]
  InvalidNumerator,

  #[fail(display = "Time signature denominator must be a power of two: {}", denominator)]
  InvalidDenominator { denominator: u8 },

  #[fail(display = "Ticks per quarter note must be positive")]
  InvalidTicksPerQuarterNote,

  #[fail(display = "Unsupported SMPTE frame rate: {}", frames_per_second)]
  InvalidFrameRate { frames_per_second: u8 },

  #[fail(display = "SMPTE ticks per frame must be positive")]
  InvalidTicksPerFrame,
}

#[derive(Deserialize, Debug, Clone)]
pub enum Division {
  #[serde(rename = "ticks_per_quarter_note")]
  TicksPerQuarterNote(u16),
  #[serde(rename = "smpte")]
  SmpteFrames {
    frames_per_second: u8,
    ticks_per_frame: u8,
  },
}

impl Division {
  fn to_time_division(&self) -> Result<TimeDivision, ConfigError> {
    match *self {
      Division::TicksPerQuarterNote(ticks) => {
        if ticks == 0 {
          return Err(ConfigError::InvalidTicksPerQuarterNote);
        }
        Ok(TimeDivision::TicksPerQuarterNote(ticks))
      }
      Division::SmpteFrames {
        frames_per_second,
        ticks_per_frame,
      } => {
        match frames_per_second {
          24 | 25 | 29 | 30 => {}
          _ => return Err(ConfigError::InvalidFrameRate { frames_per_second }),
        }
        if ticks_per_frame == 0 {
          return Err(ConfigError::InvalidTicksPerFrame);
        }
        Ok(TimeDivision::SmpteFrames {
          frames_per_second,
          ticks_per_frame,
        })
      }
    }
  }
}

impl Default for Division {
  fn default() -> Division {
    Division::TicksPerQuarterNote(96)
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SignatureConfig {
  pub numerator: u8,
  pub denominator: u8,
}

impl Default for SignatureConfig {
  fn default() -> SignatureConfig {
    SignatureConfig {
      numerator: 4,
      denominator: 4,
    }
  }
}

impl SignatureConfig {
  fn to_signature(&self) -> Result<Signature, ConfigError> {
    if self.numerator == 0 {
      return Err(ConfigError::InvalidNumerator);
    }
    if !self.denominator.is_power_of_two() {
      return Err(ConfigError::InvalidDenominator {
        denominator: self.denominator,
      });
    }
    Ok(Signature::new(self.numerator, self.denominator))
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TempoChange {
  pub time: u64,
  pub tempo: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SignatureChange {
  pub time: u64,
  pub numerator: u8,
  pub denominator: u8,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TempoMapConfig {
  pub division: Division,
  pub tempo: u32, // microseconds per quarter note
  pub signature: SignatureConfig,
  pub tempo_changes: Vec<TempoChange>,
  pub signature_changes: Vec<SignatureChange>,
}

impl Default for TempoMapConfig {
  fn default() -> TempoMapConfig {
    TempoMapConfig {
      division: Division::default(),
      tempo: 500_000,
      signature: SignatureConfig::default(),
      tempo_changes: Vec::new(),
      signature_changes: Vec::new(),
    }
  }
}

impl TempoMapConfig {
  pub fn from_file<'a, T>(path: T) -> Result<TempoMapConfig, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: TempoMapConfig = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<TempoMapConfig, Error>
  where
    T: Into<&'a str>,
  {
    let config: TempoMapConfig = toml::from_str(content.into())?;
    Ok(config)
  }

  /// Validates the description and folds it into a tempo map.
  pub fn build(&self) -> Result<TempoMap, ConfigError> {
    if self.tempo == 0 {
      return Err(ConfigError::InvalidTempo);
    }

    let mut map = TempoMap::new(self.division.to_time_division()?)
      .with_tempo(Tempo::new(self.tempo))
      .with_signature(self.signature.to_signature()?);

    for change in &self.tempo_changes {
      if change.tempo == 0 {
        return Err(ConfigError::InvalidTempo);
      }
      map.set_tempo(TicksTime::new(change.time), Tempo::new(change.tempo));
    }

    for change in &self.signature_changes {
      let signature = SignatureConfig {
        numerator: change.numerator,
        denominator: change.denominator,
      }
      .to_signature()?;
      map.set_signature(TicksTime::new(change.time), signature);
    }

    Ok(map)
  }
}

#[cfg(test)]
mod test {

  use super::{ConfigError, TempoMapConfig};
  use crate::time::{Signature, Tempo, TicksTime, TimeDivision};

  #[test]
  pub fn defaults() {
    let config = TempoMapConfig::from_str("").unwrap();
    let map = config.build().unwrap();

    assert_eq!(map.get_time_division(), TimeDivision::TicksPerQuarterNote(96));
    assert_eq!(map.tempo_at(TicksTime::zero()), Tempo::new(500_000));
    assert_eq!(map.signature_at(TicksTime::zero()), Signature::new(4, 4));
  }

  #[test]
  pub fn declarative_map() {
    let config = TempoMapConfig::from_str(
      r#"
        division = { ticks_per_quarter_note = 480 }
        tempo = 400000

        [signature]
        numerator = 3
        denominator = 4

        [[tempo_changes]]
        time = 960
        tempo = 200000

        [[signature_changes]]
        time = 1920
        numerator = 6
        denominator = 8
      "#,
    )
    .unwrap();
    let map = config.build().unwrap();

    assert_eq!(
      map.get_time_division(),
      TimeDivision::TicksPerQuarterNote(480)
    );
    assert_eq!(map.tempo_at(TicksTime::zero()), Tempo::new(400_000));
    assert_eq!(map.tempo_at(TicksTime::new(960)), Tempo::new(200_000));
    assert_eq!(map.signature_at(TicksTime::zero()), Signature::new(3, 4));
    assert_eq!(map.signature_at(TicksTime::new(1920)), Signature::new(6, 8));
  }

  #[test]
  pub fn rejects_zero_tempo() {
    let config = TempoMapConfig::from_str("tempo = 0").unwrap();
    assert_eq!(config.build().unwrap_err(), ConfigError::InvalidTempo);
  }

  #[test]
  pub fn rejects_non_power_of_two_denominator() {
    let config = TempoMapConfig::from_str(
      r#"
        [signature]
        numerator = 4
        denominator = 3
      "#,
    )
    .unwrap();
    assert_eq!(
      config.build().unwrap_err(),
      ConfigError::InvalidDenominator { denominator: 3 }
    );
  }

  #[test]
  pub fn rejects_zero_numerator_in_changes() {
    let config = TempoMapConfig::from_str(
      r#"
        [[signature_changes]]
        time = 100
        numerator = 0
        denominator = 4
      "#,
    )
    .unwrap();
    assert_eq!(config.build().unwrap_err(), ConfigError::InvalidNumerator);
  }

  #[test]
  pub fn rejects_zero_ticks_per_quarter_note() {
    let config = TempoMapConfig::from_str("division = { ticks_per_quarter_note = 0 }").unwrap();
    assert_eq!(
      config.build().unwrap_err(),
      ConfigError::InvalidTicksPerQuarterNote
    );
  }

  #[test]
  pub fn rejects_unsupported_smpte_rate() {
    let config = TempoMapConfig::from_str(
      r#"
        division = { smpte = { frames_per_second = 23, ticks_per_frame = 40 } }
      "#,
    )
    .unwrap();
    assert_eq!(
      config.build().unwrap_err(),
      ConfigError::InvalidFrameRate {
        frames_per_second: 23
      }
    );
  }
}
