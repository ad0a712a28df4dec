use std::{
    collections::HashSet,
    io::{BufRead, Write},
};

use anyhow::{bail, Context, Result};
use nmea0183::{read_sentences, Sentence};
use regex::Regex;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct Filters {
    topics: HashSet<String>,
    talkers: HashSet<String>,
    exclude_topics: HashSet<String>,
}

fn parse_codes(list: &[String], len: usize, name: &str) -> Result<HashSet<String>> {
    let rx = Regex::new(&format!("^[A-Z]{{{len}}}$")).expect("regex to compile");
    let mut values = HashSet::default();
    for (i, s) in list.iter().enumerate() {
        let code = s.trim().to_ascii_uppercase();
        if !rx.is_match(&code) {
            bail!("invalid {name} {s:?} at {i}; expected {len} letters");
        }
        values.insert(code);
    }
    Ok(values)
}

impl Filters {
    pub fn new(topics: &[String], talkers: &[String], exclude_topics: &[String]) -> Result<Self> {
        let filters = Filters {
            topics: parse_codes(topics, Sentence::TOPIC_LEN, "topic")?,
            talkers: parse_codes(talkers, Sentence::TALKER_LEN, "talker")?,
            exclude_topics: parse_codes(exclude_topics, Sentence::TOPIC_LEN, "topic")?,
        };
        if filters.topics.is_empty()
            && filters.talkers.is_empty()
            && filters.exclude_topics.is_empty()
        {
            bail!("no filters specified");
        }
        Ok(filters)
    }

    fn keep(&self, sentence: &Sentence) -> bool {
        if !self.topics.is_empty() && !self.topics.contains(sentence.topic()) {
            trace!(topic = sentence.topic(), "skip not included");
            return false;
        }
        if !self.talkers.is_empty() && !self.talkers.contains(sentence.talker()) {
            trace!(talker = sentence.talker(), "skip talker not included");
            return false;
        }
        if self.exclude_topics.contains(sentence.topic()) {
            trace!(topic = sentence.topic(), "skip excluded");
            return false;
        }
        true
    }
}

#[derive(Debug, Default)]
pub struct Stats {
    pub written: usize,
    pub skipped: usize,
    pub invalid: usize,
}

pub fn filter<R, W>(input: R, mut writer: W, filters: &Filters) -> Result<Stats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = Stats::default();
    for (lineno, zult) in read_sentences(input).enumerate() {
        let sentence = match zult {
            Ok(sentence) => sentence,
            Err(nmea0183::Error::Io(err)) => {
                return Err(err).context("reading input");
            }
            Err(err) => {
                debug!(line = lineno + 1, "dropping invalid sentence: {err}");
                stats.invalid += 1;
                continue;
            }
        };
        if !filters.keep(&sentence) {
            stats.skipped += 1;
            continue;
        }
        writer
            .write_all(&sentence.encode())
            .context("writing output")?;
        stats.written += 1;
    }
    writer.flush().context("flushing output")?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAT: &[u8] = b"\
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
$GLGSV,1,1,03,65,45,120,38,66,12,300,,72,,,22*69\r\n\
garbage\r\n\
$GPGSV,1,1,00*79\r\n\
$IIXDR,C,19.52,C,TempAir\r\n";

    fn strings(vals: &[&str]) -> Vec<String> {
        vals.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn filter_topics() {
        let filters = Filters::new(&strings(&["gsv", "XDR"]), &[], &[]).unwrap();
        let mut out = Vec::default();
        let stats = filter(DAT, &mut out, &filters).unwrap();

        assert_eq!(stats.written, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.invalid, 1);
        // XDR is written with its checksum
        let expected: &[u8] = b"\
$GLGSV,1,1,03,65,45,120,38,66,12,300,,72,,,22*69\r\n\
$GPGSV,1,1,00*79\r\n\
$IIXDR,C,19.52,C,TempAir*19\r\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn filter_talkers_and_excludes() {
        let filters = Filters::new(&[], &strings(&["GP"]), &strings(&["RMC"])).unwrap();
        let mut out = Vec::default();
        let stats = filter(DAT, &mut out, &filters).unwrap();

        assert_eq!(stats.written, 1);
        assert_eq!(out, b"$GPGSV,1,1,00*79\r\n");
    }

    #[test]
    fn invalid_filters() {
        assert!(Filters::new(&[], &[], &[]).is_err());
        assert!(Filters::new(&strings(&["RM"]), &[], &[]).is_err());
        assert!(Filters::new(&[], &strings(&["G1"]), &[]).is_err());
        assert!(Filters::new(&[], &[], &strings(&["RMC,"])).is_err());
    }
}
