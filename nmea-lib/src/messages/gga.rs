use super::{fields, FromSentence};
use crate::{Error, Result, Sentence};

/// Fix type reported by GGA. There is no variant for fix type 0 because an
/// [AltitudeFix] cannot be constructed without a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FixQuality {
    /// GPS fix, no correction data used
    Autonomous,
    /// DGPS fix, e.g., using WAAS or EGNOS
    Differential,
    Pps,
    /// Real Time Kinematic
    RtkFixed,
    RtkFloat,
    /// Dead reckoning
    Estimated,
    Manual,
    Simulation,
    /// Non-standard, reported by some receivers instead of differential
    Waas,
}

impl FixQuality {
    /// Quality for a non-zero fix type code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::Autonomous,
            2 => Self::Differential,
            3 => Self::Pps,
            4 => Self::RtkFixed,
            5 => Self::RtkFloat,
            6 => Self::Estimated,
            7 => Self::Manual,
            8 => Self::Simulation,
            9 => Self::Waas,
            _ => return None,
        })
    }
}

/// GGA, fix data.
///
/// ```text
/// $GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000*6E
///                                                 | |  |   |         |
///                                                 | |  |   |         geoid separation, meters
///                                                 | |  |   altitude above mean sea level, meters
///                                                 | |  horizontal dilution of precision
///                                                 | satellites in use
///                                                 fix type, 0 is no position
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AltitudeFix {
    /// Meters above mean sea level
    pub altitude: f64,
    pub quality: FixQuality,
    pub satellites_in_use: Option<u8>,
    pub hdop: Option<f64>,
    /// Height of the geoid above the ellipsoid in meters
    pub geoid_separation: Option<f64>,
}

impl AltitudeFix {
    const MIN_FIELDS: usize = 9;
    const FIX_TYPE_FIELD: usize = 5;
}

impl FromSentence for AltitudeFix {
    const TOPIC: &'static str = "GGA";

    fn from_sentence(sentence: &Sentence) -> Result<Self> {
        sentence.expect_topic(Self::TOPIC)?;
        sentence.expect_fields(Self::MIN_FIELDS)?;

        let fix_type = sentence.field(Self::FIX_TYPE_FIELD).unwrap_or_default();
        if fix_type.is_empty() || fix_type == "0" {
            return Err(Error::InvalidFix("no position available"));
        }
        let quality = fields::required::<u8>(sentence, Self::FIX_TYPE_FIELD)
            .ok()
            .and_then(FixQuality::from_code)
            .ok_or_else(|| Error::InvalidField {
                index: Self::FIX_TYPE_FIELD,
                value: fix_type.to_string(),
            })?;

        Ok(AltitudeFix {
            altitude: fields::required(sentence, 8)?,
            quality,
            satellites_in_use: fields::optional(sentence, 6)?,
            hdop: fields::optional(sentence, 7)?,
            geoid_separation: fields::optional(sentence, 10)?,
        })
    }
}
