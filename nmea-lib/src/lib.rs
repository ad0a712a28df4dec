#![doc = include_str!("../README.md")]
mod error;

pub mod checksum;
pub mod messages;
pub mod satview;
pub mod sentence;
pub mod stream;
pub mod summary;

pub use error::{Error, Result};
pub use messages::{
    AltitudeFix, FixMode, FixQuality, FromSentence, Measurement, Message, PositionFix,
    PrecisionReport, SatelliteObservation, SatelliteViewFrame, Topic,
};
pub use satview::{SatelliteView, SatelliteViewAssembler};
pub use sentence::Sentence;
pub use stream::{read_sentences, Event, MessageDecoder};
pub use summary::{ErrorSummary, Summary};
