use std::collections::BTreeMap;

use crate::{Error, Event, Message, Result};

/// Error counts by kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorSummary {
    pub framing: usize,
    pub checksum: usize,
    pub topic_mismatch: usize,
    pub invalid_fix: usize,
    pub field_count: usize,
    pub invalid_field: usize,
    pub io: usize,
}

impl ErrorSummary {
    fn add(&mut self, err: &Error) {
        match err {
            Error::Framing(_) => self.framing += 1,
            Error::Checksum { .. } => self.checksum += 1,
            Error::TopicMismatch { .. } => self.topic_mismatch += 1,
            Error::InvalidFix(_) => self.invalid_fix += 1,
            Error::FieldCount { .. } => self.field_count += 1,
            Error::InvalidField { .. } => self.invalid_field += 1,
            Error::Io(_) => self.io += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.framing
            + self.checksum
            + self.topic_mismatch
            + self.invalid_fix
            + self.field_count
            + self.invalid_field
            + self.io
    }
}

/// Tracks stats on [Event] iteration.
///
/// # Example
/// ```
/// use nmea0183::{MessageDecoder, Summary};
/// let dat: &[u8] = b"$GPGSV,1,1,00*79\r\n$GPGSV,1,1,00*78\r\n";
///
/// let mut summary = Summary::default();
/// MessageDecoder::builder()
///     .build()
///     .decode(dat)
///     .for_each(|zult| summary.add(&zult));
///
/// assert_eq!(summary.lines, 2);
/// assert_eq!(summary.topics["GSV"], 1);
/// assert_eq!(summary.views, 1);
/// assert_eq!(summary.errors.checksum, 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Number of lines read, i.e., messages and errors
    pub lines: usize,
    /// Number of successfully decoded messages, including unrecognized topics
    pub messages: usize,
    /// Number of messages with a topic that has no typed record
    pub unrecognized: usize,
    /// Number of completed satellites-in-view reports
    pub views: usize,
    /// Message count per topic code
    pub topics: BTreeMap<String, usize>,
    /// Message count per talker
    pub talkers: BTreeMap<String, usize>,
    pub errors: ErrorSummary,
}

impl Summary {
    pub fn add(&mut self, item: &Result<Event>) {
        match item {
            Ok(Event::Message { talker, message }) => {
                self.lines += 1;
                self.messages += 1;
                let topic = match message {
                    Message::Unrecognized(sentence) => {
                        self.unrecognized += 1;
                        sentence.topic()
                    }
                    // Every other message has a topic
                    _ => message.topic().map(|t| t.code()).unwrap_or_default(),
                };
                *self.topics.entry(topic.to_string()).or_default() += 1;
                *self.talkers.entry(talker.clone()).or_default() += 1;
            }
            Ok(Event::SatelliteView(_)) => self.views += 1,
            Err(err) => {
                self.lines += 1;
                self.errors.add(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageDecoder;

    #[test]
    fn summary() {
        let dat: &[u8] = b"\
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
$GPRMC,123519,V,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*7D\r\n\
$GPZDA,201530.00,04,07,2002,00,00*60\r\n\
$GLGSV,1,1,03,65,45,120,38,66,12,300,,72,,,22*69\r\n\
$IIXDR,C,19.52,C,TempAir*18\r\n\
$IIXDR,C,19.52,C,TempAir*19\r\n";

        let mut summary = Summary::default();
        for zult in MessageDecoder::builder().build().decode(dat) {
            summary.add(&zult);
        }

        assert_eq!(summary.lines, 6);
        assert_eq!(summary.messages, 4);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.views, 1);
        assert_eq!(summary.topics.len(), 4);
        assert_eq!(summary.topics["RMC"], 1);
        assert_eq!(summary.topics["ZDA"], 1);
        assert_eq!(summary.topics["GSV"], 1);
        assert_eq!(summary.topics["XDR"], 1);
        assert_eq!(summary.talkers["GP"], 2);
        assert_eq!(summary.talkers["GL"], 1);
        assert_eq!(summary.talkers["II"], 1);
        assert_eq!(summary.errors.invalid_fix, 1);
        assert_eq!(summary.errors.checksum, 1);
        assert_eq!(summary.errors.total(), 2);
    }
}
