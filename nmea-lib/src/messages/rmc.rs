use chrono::{DateTime, Utc};

use super::{fields, FromSentence};
use crate::{Error, Result, Sentence};

/// Mode indicator added to RMC in NMEA 2.3. Only autonomous and differential modes
/// are considered reliable, so they are the only modes a [PositionFix] can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FixMode {
    Autonomous,
    Differential,
}

/// RMC, recommended minimum position, velocity, and time.
///
/// ```text
/// $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A
///        |      | |          |           |     |     |      |
///        |      | |          |           |     |     |      magnetic variation (ignored)
///        |      | |          |           |     |     date, 23rd of March 1994
///        |      | |          |           |     track angle, degrees true
///        |      | |          |           speed over ground, knots
///        |      | |          longitude 11 deg 31.000' E
///        |      | latitude 48 deg 07.038' N
///        |      status, A=active, V=void
///        fix time 12:35:19 UTC
/// ```
///
/// NMEA 2.3 and later append a mode indicator after the magnetic variation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionFix {
    /// UTC fix time, second resolution
    pub time: DateTime<Utc>,
    /// Decimal degrees, negative is south
    pub latitude: f64,
    /// Decimal degrees, negative is west
    pub longitude: f64,
    /// Speed over ground in knots
    pub speed: f64,
    /// Track angle in degrees true. Receivers commonly leave this empty when not moving.
    pub heading: Option<f64>,
    /// Mode indicator, if the sentence carries one
    pub mode: Option<FixMode>,
}

impl PositionFix {
    const MIN_FIELDS: usize = 9;
    const MODE_FIELD: usize = 11;
}

impl FromSentence for PositionFix {
    const TOPIC: &'static str = "RMC";

    fn from_sentence(sentence: &Sentence) -> Result<Self> {
        sentence.expect_topic(Self::TOPIC)?;
        sentence.expect_fields(Self::MIN_FIELDS)?;

        if sentence.field(1) != Some("A") {
            return Err(Error::InvalidFix("void status"));
        }
        let mode = match sentence.field(Self::MODE_FIELD) {
            None | Some("") => None,
            Some("A") => Some(FixMode::Autonomous),
            Some("D") => Some(FixMode::Differential),
            Some(_) => return Err(Error::InvalidFix("unreliable mode indicator")),
        };

        let time = fields::date(sentence, 8)?.and_time(fields::time(sentence, 0)?);

        Ok(PositionFix {
            time: time.and_utc(),
            latitude: fields::latitude(sentence, 2)?,
            longitude: fields::longitude(sentence, 4)?,
            speed: fields::required(sentence, 6)?,
            heading: fields::optional(sentence, 7)?,
            mode,
        })
    }
}
