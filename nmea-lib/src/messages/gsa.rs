use super::{fields, FromSentence};
use crate::{Result, Sentence};

/// GSA, dilution of precision and active satellites.
///
/// DOP values are unitless; smaller is better.
///
/// ```text
/// $GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39
///        | | |                     |   |   |
///        | | |                     |   |   vertical DOP
///        | | |                     |   horizontal DOP
///        | | |                     position DOP
///        | | PRNs used for the fix, space for 12
///        | 1 = no fix, 2 = 2D, 3 = 3D
///        A = automatic, M = manual 2D/3D selection
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrecisionReport {
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    /// PRNs of the satellites used in the solution, in sentence order
    pub satellites: Vec<u16>,
}

impl PrecisionReport {
    const MIN_FIELDS: usize = 17;
    const PRN_FIELDS: std::ops::RangeInclusive<usize> = 2..=13;
}

impl FromSentence for PrecisionReport {
    const TOPIC: &'static str = "GSA";

    fn from_sentence(sentence: &Sentence) -> Result<Self> {
        sentence.expect_topic(Self::TOPIC)?;
        sentence.expect_fields(Self::MIN_FIELDS)?;

        let mut satellites = Vec::default();
        for idx in Self::PRN_FIELDS {
            if let Some(prn) = fields::optional(sentence, idx)? {
                satellites.push(prn);
            }
        }

        Ok(PrecisionReport {
            pdop: fields::required(sentence, 14)?,
            hdop: fields::required(sentence, 15)?,
            vdop: fields::required(sentence, 16)?,
            satellites,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn decode_reference() {
        let raw = b"$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n";
        let report = PrecisionReport::from_sentence(&Sentence::decode(raw).unwrap()).unwrap();

        assert_eq!(report.pdop, 2.5);
        assert_eq!(report.hdop, 1.3);
        assert_eq!(report.vdop, 2.1);
        assert_eq!(report.satellites, vec![4, 5, 9, 12, 24]);
    }

    #[test]
    fn decode_missing_dop() {
        let mut fields = vec![""; 17];
        fields[0] = "A";
        fields[1] = "1";
        let sentence = Sentence::new("GP", "GSA", fields).unwrap();
        let zult = PrecisionReport::from_sentence(&sentence);

        assert!(
            matches!(zult, Err(Error::InvalidField { index: 14, .. })),
            "got {zult:?}"
        );
    }

    #[test]
    fn decode_too_few_fields() {
        let sentence = Sentence::new("GP", "GSA", ["A", "3", "2.5", "1.3", "2.1"]).unwrap();
        let zult = PrecisionReport::from_sentence(&sentence);

        assert!(
            matches!(zult, Err(Error::FieldCount { actual: 5, minimum: 17 })),
            "got {zult:?}"
        );
    }
}
