//! Decoding sentences and messages from a line oriented source, e.g., a serial port or a
//! capture file.
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, ErrorKind, Read};

use tracing::trace;
use typed_builder::TypedBuilder;

use crate::{checksum, Error, Message, Result, SatelliteView, SatelliteViewAssembler, Sentence};

/// Default maximum line length, including the terminator. Standard sentences are at most
/// 82 bytes, but many receivers exceed that.
pub const DEFAULT_MAX_LINE_LEN: usize = 256;

struct SentenceIter<R>
where
    R: BufRead,
{
    reader: R,
    max_line_len: usize,
    line: Vec<u8>,
    done: bool,
}

impl<R> SentenceIter<R>
where
    R: BufRead,
{
    fn new(reader: R, max_line_len: usize) -> Self {
        SentenceIter {
            reader,
            max_line_len,
            line: Vec::with_capacity(max_line_len.min(DEFAULT_MAX_LINE_LEN)),
            done: false,
        }
    }

    /// Consume input through the next `\n` without buffering it, returning the number of
    /// bytes discarded.
    fn discard_line(&mut self) -> std::io::Result<usize> {
        let mut discarded = 0;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if buf.is_empty() {
                return Ok(discarded);
            }
            match buf.iter().position(|b| *b == b'\n') {
                Some(pos) => {
                    self.reader.consume(pos + 1);
                    return Ok(discarded + pos + 1);
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                    discarded += len;
                }
            }
        }
    }
}

impl<R> Iterator for SentenceIter<R>
where
    R: BufRead,
{
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.line.clear();
        // Never buffer more than one byte past the limit
        let limit = u64::try_from(self.max_line_len.saturating_add(1)).unwrap_or(u64::MAX);
        let zult = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.line);
        match zult {
            Ok(0) => {
                trace!("no more lines");
                self.done = true;
                None
            }
            Ok(len) if len > self.max_line_len => {
                let mut total = len;
                if self.line.last() != Some(&b'\n') {
                    match self.discard_line() {
                        Ok(discarded) => total += discarded,
                        Err(err) => {
                            self.done = true;
                            return Some(Err(Error::Io(err)));
                        }
                    }
                }
                self.line.clear();
                trace!(len = total, "discarded long line");
                Some(Err(Error::Framing(format!(
                    "line length {total} exceeds maximum {}",
                    self.max_line_len
                ))))
            }
            // A trailing partial line fails decoding for lack of a terminator
            Ok(_) => Some(Sentence::decode(&self.line)),
            Err(err) => {
                // Transport failures are not recoverable
                self.done = true;
                Some(Err(Error::Io(err)))
            }
        }
    }
}

/// Read and decode one sentence per `\n` terminated line from `reader`.
///
/// Decode failures are provided as errors and do not end iteration. An I/O error is
/// provided as [Error::Io] and ends iteration.
///
/// # Example
/// ```
/// use nmea0183::read_sentences;
///
/// let dat: &[u8] = b"$GPGSV,1,1,00*79\r\n$GPGSV,1,1,00*78\r\n";
/// let zult: Vec<_> = read_sentences(dat).collect();
///
/// assert_eq!(zult.len(), 2);
/// assert!(zult[0].is_ok());
/// assert!(zult[1].is_err());
/// ```
pub fn read_sentences<R>(reader: R) -> impl Iterator<Item = Result<Sentence>>
where
    R: BufRead,
{
    SentenceIter::new(reader, usize::MAX)
}

/// Item produced by [MessageDecoder::decode].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Event {
    /// A decoded sentence and the talker that sent it.
    Message { talker: String, message: Message },
    /// A completed satellites-in-view report. It immediately follows the GSV message that
    /// completed it.
    SatelliteView(SatelliteView),
}

/// Decodes a stream of sentences into [Event]s.
///
/// GSV reports are reassembled per talker, so reports from, e.g., GPS (`GP`) and GLONASS
/// (`GL`) interleaved on the same source are assembled independently.
#[derive(TypedBuilder, Debug, Clone)]
pub struct MessageDecoder {
    /// Reject sentences that do not carry a checksum.
    #[builder(default)]
    require_checksum: bool,
    /// Lines longer than this, including the terminator, are framing errors.
    #[builder(default = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

impl MessageDecoder {
    /// Decode all lines from `reader`.
    ///
    /// Per-sentence errors are provided in place of the event and decoding continues with
    /// the next line. An I/O error is provided as [Error::Io] and ends decoding.
    pub fn decode<R>(&self, reader: R) -> impl Iterator<Item = Result<Event>>
    where
        R: BufRead,
    {
        EventIter {
            sentences: SentenceIter::new(reader, self.max_line_len),
            require_checksum: self.require_checksum,
            assemblers: HashMap::default(),
            ready: VecDeque::default(),
        }
    }
}

struct EventIter<I>
where
    I: Iterator<Item = Result<Sentence>>,
{
    sentences: I,
    require_checksum: bool,
    // One assembler per talker
    assemblers: HashMap<String, SatelliteViewAssembler>,
    // Views completed, waiting for their GSV message to be provided first
    ready: VecDeque<Event>,
}

impl<I> EventIter<I>
where
    I: Iterator<Item = Result<Sentence>>,
{
    fn handle(&mut self, sentence: Sentence) -> Result<Event> {
        if self.require_checksum && sentence.checksum().is_none() {
            return Err(Error::Checksum {
                expected: String::from_utf8_lossy(&checksum::compute(sentence.body().as_bytes()))
                    .to_string(),
                actual: String::new(),
            });
        }
        let talker = sentence.talker().to_string();
        let message = Message::decode(sentence)?;

        if let Message::SatellitesInView(frame) = &message {
            let assembler = self.assemblers.entry(talker.clone()).or_default();
            if let Some(view) = assembler.push(frame.clone()) {
                trace!(
                    talker = %view.talker,
                    satellites = view.observations.len(),
                    "view completed"
                );
                self.ready.push_back(Event::SatelliteView(view));
            }
        }

        Ok(Event::Message { talker, message })
    }
}

impl<I> Iterator for EventIter<I>
where
    I: Iterator<Item = Result<Sentence>>,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.ready.pop_front() {
            return Some(Ok(event));
        }
        let sentence = match self.sentences.next()? {
            Ok(sentence) => sentence,
            Err(err) => return Some(Err(err)),
        };
        Some(self.handle(sentence))
    }
}
