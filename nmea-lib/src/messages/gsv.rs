use super::{fields, FromSentence};
use crate::{Error, Result, Sentence};

/// A single satellite from a GSV sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SatelliteObservation {
    pub prn: u16,
    /// Degrees, `None` when the satellite is not tracked
    pub elevation: Option<u8>,
    /// Degrees true, `None` when the satellite is not tracked
    pub azimuth: Option<u16>,
    /// Signal to noise, 0-99 dB, `None` when not tracking
    pub snr: Option<u8>,
}

/// GSV, satellites in view.
///
/// One sentence carries at most 4 satellites so a full report is spread over
/// `total` sentences. See [SatelliteViewAssembler](crate::SatelliteViewAssembler).
///
/// ```text
/// $GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75
///        | | |  |  |  |   |
///        | | |  |  |  |   SNR
///        | | |  |  |  azimuth
///        | | |  |  elevation
///        | | |  PRN, repeated for up to 4 satellites
///        | | satellites in view
///        | this sentence's index, 1-based
///        number of sentences in the report
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SatelliteViewFrame {
    pub talker: String,
    pub total: u8,
    pub index: u8,
    /// Number of satellites in view declared for the whole report
    pub satellite_count: u16,
    pub observations: Vec<SatelliteObservation>,
}

impl SatelliteViewFrame {
    const MIN_FIELDS: usize = 3;
    const GROUP_LEN: usize = 4;

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 1
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index == self.total
    }
}

impl FromSentence for SatelliteViewFrame {
    const TOPIC: &'static str = "GSV";

    fn from_sentence(sentence: &Sentence) -> Result<Self> {
        sentence.expect_topic(Self::TOPIC)?;
        sentence.expect_fields(Self::MIN_FIELDS)?;

        let total: u8 = fields::required(sentence, 0)?;
        let index: u8 = fields::required(sentence, 1)?;
        if total == 0 {
            return Err(Error::InvalidField {
                index: 0,
                value: total.to_string(),
            });
        }
        if index == 0 || index > total {
            return Err(Error::InvalidField {
                index: 1,
                value: index.to_string(),
            });
        }

        // Trailing fields that don't make up a full group, e.g., the NMEA 4.1 signal id,
        // are ignored.
        let mut observations = Vec::default();
        let mut start = Self::MIN_FIELDS;
        while start + Self::GROUP_LEN <= sentence.fields().len() {
            // An empty PRN is an unused slot
            if let Some(prn) = fields::optional(sentence, start)? {
                observations.push(SatelliteObservation {
                    prn,
                    elevation: fields::optional(sentence, start + 1)?,
                    azimuth: fields::optional(sentence, start + 2)?,
                    snr: fields::optional(sentence, start + 3)?,
                });
            }
            start += Self::GROUP_LEN;
        }

        Ok(SatelliteViewFrame {
            talker: sentence.talker().to_string(),
            total,
            index,
            satellite_count: fields::required(sentence, 2)?,
            observations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn decode(raw: &[u8]) -> Result<SatelliteViewFrame> {
        SatelliteViewFrame::from_sentence(&Sentence::decode(raw).unwrap())
    }

    #[test]
    fn decode_reference() {
        let frame =
            decode(b"$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75\r\n")
                .unwrap();

        assert_eq!(frame.talker, "GP");
        assert_eq!(frame.total, 2);
        assert_eq!(frame.index, 1);
        assert_eq!(frame.satellite_count, 8);
        assert!(frame.is_first());
        assert!(!frame.is_last());
        assert_eq!(frame.observations.len(), 4);
        assert_eq!(
            frame.observations[0],
            SatelliteObservation {
                prn: 1,
                elevation: Some(40),
                azimuth: Some(83),
                snr: Some(46),
            }
        );
        assert_eq!(frame.observations[3].prn, 14);
        assert_eq!(frame.observations[3].azimuth, Some(228));
    }

    #[test]
    fn decode_missing_values_are_none() {
        let frame =
            decode(b"$GPGSV,2,2,08,15,,,,17,61,124,,19,10,012,30,24,33,155,48*41\r\n").unwrap();

        assert!(frame.is_last());
        assert_eq!(
            frame.observations[0],
            SatelliteObservation {
                prn: 15,
                elevation: None,
                azimuth: None,
                snr: None,
            }
        );
        assert_eq!(frame.observations[1].snr, None);
        assert_eq!(frame.observations[1].elevation, Some(61));
    }

    #[test]
    fn decode_skips_empty_slots() {
        let frame =
            decode(b"$GPGSV,3,3,11,22,42,067,42,24,14,311,43,27,05,244,00,,,,*4D\r\n").unwrap();

        assert_eq!(frame.observations.len(), 3);
        assert_eq!(frame.observations[2].prn, 27);
        assert_eq!(frame.observations[2].snr, Some(0));
    }

    #[test]
    fn decode_partial_group_ignored() {
        let fields = ["1", "1", "01", "05", "10", "200", "30", "7"];
        let sentence = Sentence::new("GA", "GSV", fields).unwrap();
        let frame = SatelliteViewFrame::from_sentence(&sentence).unwrap();

        assert_eq!(frame.observations.len(), 1);
        assert_eq!(frame.talker, "GA");
    }

    #[test]
    fn decode_no_satellites() {
        let frame = decode(b"$GPGSV,1,1,00*79\r\n").unwrap();

        assert!(frame.is_first());
        assert!(frame.is_last());
        assert!(frame.observations.is_empty());
    }

    #[test_case(&["0", "1", "00"], 0; "zero total")]
    #[test_case(&["2", "0", "00"], 1; "zero index")]
    #[test_case(&["2", "3", "00"], 1; "index past total")]
    #[test_case(&["2", "1", ""], 2; "missing count")]
    #[test_case(&["2", "1", "08", "x", "", "", ""], 3; "bad prn")]
    fn decode_invalid_fields(fields: &[&str], bad_idx: usize) {
        let sentence = Sentence::new("GP", "GSV", fields.iter().copied()).unwrap();
        let zult = SatelliteViewFrame::from_sentence(&sentence);
        match zult {
            Err(Error::InvalidField { index, .. }) => assert_eq!(index, bad_idx),
            _ => panic!("expected invalid field, got {zult:?}"),
        }
    }
}
