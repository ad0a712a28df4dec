//! Reassembly of multi-sentence GSV reports.
use tracing::debug;

use crate::{SatelliteObservation, SatelliteViewFrame};

/// A complete satellites-in-view report assembled from one or more GSV sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SatelliteView {
    pub talker: String,
    /// Satellites in view as declared by the final sentence of the report. This may not
    /// match the number of observations if the receiver left slots empty.
    pub declared: u16,
    /// Observations from all sentences in arrival order
    pub observations: Vec<SatelliteObservation>,
}

/// Collects [SatelliteViewFrame]s until a report is complete.
///
/// Frames are expected in order. A frame with index 1 always starts a new report,
/// abandoning anything collected so far, and the frame where `index == total` completes
/// it. There is no detection of missing or repeated frames in between and no timeout.
///
/// An assembler should only be fed frames from a single talker. See
/// [MessageDecoder](crate::MessageDecoder), which keeps one assembler per talker.
///
/// # Example
/// ```
/// use nmea0183::{FromSentence, SatelliteViewAssembler, SatelliteViewFrame, Sentence};
///
/// let mut assembler = SatelliteViewAssembler::default();
/// let sentence = Sentence::decode(b"$GPGSV,1,1,00*79\r\n").unwrap();
/// let frame = SatelliteViewFrame::from_sentence(&sentence).unwrap();
///
/// let view = assembler.push(frame).unwrap();
/// assert_eq!(view.declared, 0);
/// assert!(assembler.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct SatelliteViewAssembler {
    talker: String,
    observations: Vec<SatelliteObservation>,
    // Number of frames collected for the current report
    frames: usize,
}

impl SatelliteViewAssembler {
    /// Add a frame, returning the completed view if this frame finishes a report.
    pub fn push(&mut self, frame: SatelliteViewFrame) -> Option<SatelliteView> {
        let SatelliteViewFrame {
            talker,
            total,
            index,
            satellite_count,
            mut observations,
        } = frame;

        if index == 1 {
            if !self.is_empty() {
                debug!(
                    talker = %self.talker,
                    frames = self.frames,
                    observations = self.observations.len(),
                    "new report started, discarding incomplete report"
                );
            }
            self.talker = talker;
            self.observations = observations;
            self.frames = 1;
        } else {
            if self.is_empty() {
                self.talker = talker;
            }
            self.observations.append(&mut observations);
            self.frames += 1;
        }

        if index == total {
            let view = SatelliteView {
                talker: std::mem::take(&mut self.talker),
                declared: satellite_count,
                observations: std::mem::take(&mut self.observations),
            };
            self.frames = 0;
            return Some(view);
        }
        None
    }

    /// True if no report is in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Number of observations collected for the report in progress.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.observations.len()
    }

    /// Abandon any report in progress.
    pub fn reset(&mut self) {
        if !self.is_empty() {
            debug!(talker = %self.talker, frames = self.frames, "resetting incomplete report");
        }
        self.talker.clear();
        self.observations.clear();
        self.frames = 0;
    }
}
