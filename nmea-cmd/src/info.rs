use anyhow::{Context, Result};
use handlebars::handlebars_helper;
use nmea0183::{Error, MessageDecoder, Summary};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    io::{stdout, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::open_input;

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Info {
    filename: String,
    summary: Summary,
}

fn summarize<R: BufRead>(input: R, require_checksum: bool) -> Result<Summary> {
    let decoder = MessageDecoder::builder()
        .require_checksum(require_checksum)
        .build();
    let mut summary = Summary::default();
    for zult in decoder.decode(input) {
        if let Err(Error::Io(err)) = zult {
            return Err(err).context("reading input");
        }
        summary.add(&zult);
    }
    Ok(summary)
}

fn summarize_path(fpath: &Path, require_checksum: bool) -> Result<Info> {
    let reader = open_input(fpath)?;
    let summary =
        summarize(reader, require_checksum).with_context(|| format!("summarizing {fpath:?}"))?;
    debug!(path = ?fpath, lines = summary.lines, "summarized");
    Ok(Info {
        filename: fpath.to_string_lossy().to_string(),
        summary,
    })
}

pub fn info(inputs: &[PathBuf], format: &Format, require_checksum: bool) -> Result<()> {
    let infos = inputs
        .par_iter()
        .map(|fpath| summarize_path(fpath, require_checksum))
        .collect::<Result<Vec<Info>>>()?;

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &infos).context("serializing to json")
        }
        Format::Text => {
            let mut out = stdout().lock();
            for info in &infos {
                let data = render_text(info).context("serializing info")?;
                out.write_all(str::as_bytes(&data))
                    .context("writing to stdout")?;
            }
            Ok(())
        }
    }
}

fn render_text(info: &Info) -> Result<String> {
    handlebars_helper!(left_pad: |num: u64, v: Json| {
        let v = match v {
            serde_json::Value::String(s) => s.to_owned(),
            serde_json::Value::Null => String::new(),
            _ => v.to_string()
        };
        let num = usize::try_from(num).unwrap_or_default().max(v.len());
        format!("{v:>num$}")
    });
    let mut hb = handlebars::Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.register_helper("lpad", Box::new(left_pad));
    hb.register_template_string("info", TEXT_TEMPLATE)
        .context("registering template")?;

    hb.render("info", &info).context("rendering text")
}

const TEXT_TEMPLATE: &str = r"{{ filename }}
===============================================================================================
Lines:          {{ summary.lines }}
Messages:       {{ summary.messages }}
Unrecognized:   {{ summary.unrecognized }}
Views:          {{ summary.views }}
Talkers:        {{ #each summary.talkers }}{{ @key }}{{ #if @last }}{{ else }}, {{ /if }}{{ /each }}
-----------------------------------------------------------------------------------------------
Topic    Count
-----------------------------------------------------------------------------------------------
{{ #each summary.topics }}{{ lpad 5 @key }}  {{ lpad 7 this }}
{{/each }}-----------------------------------------------------------------------------------------------
Errors
-----------------------------------------------------------------------------------------------
Framing:        {{ summary.errors.framing }}
Checksum:       {{ summary.errors.checksum }}
Topic mismatch: {{ summary.errors.topic_mismatch }}
Invalid fix:    {{ summary.errors.invalid_fix }}
Field count:    {{ summary.errors.field_count }}
Invalid field:  {{ summary.errors.invalid_field }}
I/O:            {{ summary.errors.io }}
";

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DAT: &[u8] = b"\
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
$GLGSV,1,1,03,65,45,120,38,66,12,300,,72,,,22*69\r\n\
$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*38\r\n\
$IIXDR,C,19.52,C,TempAir\r\n";

    #[test]
    fn summarize_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("capture.nmea");
        fs::write(&path, DAT).unwrap();

        let info = summarize_path(&path, false).unwrap();
        assert_eq!(info.summary.lines, 4);
        assert_eq!(info.summary.messages, 3);
        assert_eq!(info.summary.views, 1);
        assert_eq!(info.summary.errors.checksum, 1);

        let info = summarize_path(&path, true).unwrap();
        assert_eq!(info.summary.messages, 2);
        assert_eq!(info.summary.errors.checksum, 2);
    }

    #[test]
    fn summarize_missing_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        assert!(summarize_path(&tmpdir.path().join("missing.nmea"), false).is_err());
    }

    #[test]
    fn summarize_directory() {
        let tmpdir = tempfile::tempdir().unwrap();
        let zult = summarize_path(tmpdir.path(), false);
        assert!(zult.is_err(), "got {zult:?}");
    }

    #[test]
    fn summarize_failing_reader() {
        struct FailingReader;

        impl std::io::Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("device gone"))
            }
        }

        let zult = summarize(std::io::BufReader::new(FailingReader), false);
        assert!(zult.is_err(), "got {zult:?}");
    }

    #[test]
    fn render() {
        let info = Info {
            filename: "capture.nmea".to_string(),
            summary: summarize(DAT, false).unwrap(),
        };
        let text = render_text(&info).unwrap();

        assert!(text.starts_with("capture.nmea\n"), "{text}");
        assert!(text.contains("Talkers:        GL, GP, II\n"), "{text}");
        assert!(text.contains("  RMC        1\n"), "{text}");
        assert!(text.contains("Checksum:       1\n"), "{text}");
    }
}
