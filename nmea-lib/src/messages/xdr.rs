use super::FromSentence;
use crate::{Result, Sentence};

/// XDR, transducer measurements.
///
/// Field meaning depends on the transducer so they are passed through as-is, e.g.,
/// `$IIXDR,C,19.52,C,TempAir` is an air temperature of 19.52 degrees Celsius.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Measurement {
    pub talker: String,
    pub fields: Vec<String>,
}

impl Measurement {
    /// Build the sentence for this measurement, e.g., for forwarding.
    ///
    /// # Errors
    /// If the talker or fields are not valid for a sentence. See [Sentence::new].
    pub fn to_sentence(&self) -> Result<Sentence> {
        Sentence::new(&self.talker, Self::TOPIC, self.fields.iter().cloned())
    }
}

impl FromSentence for Measurement {
    const TOPIC: &'static str = "XDR";

    fn from_sentence(sentence: &Sentence) -> Result<Self> {
        sentence.expect_topic(Self::TOPIC)?;

        Ok(Measurement {
            talker: sentence.talker().to_string(),
            fields: sentence.fields().to_vec(),
        })
    }
}
