use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use nmea0183::{Error, Event, MessageDecoder, Summary};
use tracing::{debug, warn};

pub fn decode<R, W>(
    input: R,
    mut writer: W,
    require_checksum: bool,
    views_only: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let decoder = MessageDecoder::builder()
        .require_checksum(require_checksum)
        .build();

    let mut summary = Summary::default();
    for zult in decoder.decode(input) {
        summary.add(&zult);
        let event = match zult {
            Ok(event) => event,
            Err(Error::Io(err)) => return Err(err).context("reading input"),
            Err(err) => {
                warn!(line = summary.lines, "{err}");
                continue;
            }
        };
        if views_only && !matches!(event, Event::SatelliteView(_)) {
            continue;
        }
        serde_json::to_writer(&mut writer, &event).context("serializing to json")?;
        writer.write_all(b"\n").context("writing output")?;
    }
    writer.flush().context("flushing output")?;

    debug!(
        lines = summary.lines,
        messages = summary.messages,
        views = summary.views,
        errors = summary.errors.total(),
        "decode complete"
    );
    Ok(())
}
