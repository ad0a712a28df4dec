//! Typed records for the supported sentence topics.
//!
//! Each record implements [FromSentence]. [Message] dispatches on the sentence topic
//! and wraps the resulting record.
mod fields;
mod gga;
mod gsa;
mod gsv;
mod rmc;
mod xdr;

pub use gga::{AltitudeFix, FixQuality};
pub use gsa::PrecisionReport;
pub use gsv::{SatelliteObservation, SatelliteViewFrame};
pub use rmc::{FixMode, PositionFix};
pub use xdr::Measurement;

use crate::{Result, Sentence};

/// A record that can be decoded from a single sentence of a specific topic.
pub trait FromSentence: Sized {
    /// The 3 letter topic code this record decodes from.
    const TOPIC: &'static str;

    /// Decode a record from `sentence`.
    ///
    /// # Errors
    /// [Error::TopicMismatch](crate::Error::TopicMismatch) if the sentence topic is not
    /// [FromSentence::TOPIC], otherwise any error specific to the record layout.
    fn from_sentence(sentence: &Sentence) -> Result<Self>;
}

/// Sentence topics with a typed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Topic {
    Rmc,
    Gga,
    Gsa,
    Gsv,
    Xdr,
}

impl Topic {
    pub const ALL: [Topic; 5] = [Topic::Rmc, Topic::Gga, Topic::Gsa, Topic::Gsv, Topic::Xdr];

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Topic::Rmc => PositionFix::TOPIC,
            Topic::Gga => AltitudeFix::TOPIC,
            Topic::Gsa => PrecisionReport::TOPIC,
            Topic::Gsv => SatelliteViewFrame::TOPIC,
            Topic::Xdr => Measurement::TOPIC,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A decoded sentence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Message {
    PositionFix(PositionFix),
    AltitudeFix(AltitudeFix),
    Precision(PrecisionReport),
    SatellitesInView(SatelliteViewFrame),
    Measurement(Measurement),
    /// A valid sentence with a topic that has no typed record.
    Unrecognized(Sentence),
}

impl Message {
    /// Decode `sentence` into the record for its topic.
    ///
    /// # Errors
    /// Any error from the topic's [FromSentence] implementation. Unrecognized topics are
    /// not an error.
    pub fn decode(sentence: Sentence) -> Result<Self> {
        let Some(topic) = Topic::from_code(sentence.topic()) else {
            return Ok(Message::Unrecognized(sentence));
        };
        Ok(match topic {
            Topic::Rmc => Message::PositionFix(PositionFix::from_sentence(&sentence)?),
            Topic::Gga => Message::AltitudeFix(AltitudeFix::from_sentence(&sentence)?),
            Topic::Gsa => Message::Precision(PrecisionReport::from_sentence(&sentence)?),
            Topic::Gsv => Message::SatellitesInView(SatelliteViewFrame::from_sentence(&sentence)?),
            Topic::Xdr => Message::Measurement(Measurement::from_sentence(&sentence)?),
        })
    }

    /// The topic for this message, or `None` if unrecognized.
    #[must_use]
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Message::PositionFix(_) => Some(Topic::Rmc),
            Message::AltitudeFix(_) => Some(Topic::Gga),
            Message::Precision(_) => Some(Topic::Gsa),
            Message::SatellitesInView(_) => Some(Topic::Gsv),
            Message::Measurement(_) => Some(Topic::Xdr),
            Message::Unrecognized(_) => None,
        }
    }
}
