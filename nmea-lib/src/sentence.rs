use std::fmt::Display;

use tracing::trace;

use crate::checksum;
use crate::{Error, Result};

/// A single NMEA0183 sentence, i.e., one line of the form
/// `$<talker><topic>,<field>,...*<checksum>\r\n`.
///
/// Sentences are immutable. They are created either by decoding wire bytes with
/// [Sentence::decode] or by one of the constructors, which compute the checksum, and
/// are turned back into wire bytes with [Sentence::encode].
///
/// # Example
/// ```
/// use nmea0183::Sentence;
///
/// let raw = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
/// let sentence = Sentence::decode(raw).unwrap();
///
/// assert_eq!(sentence.talker(), "GP");
/// assert_eq!(sentence.topic(), "RMC");
/// assert_eq!(sentence.field(1), Some("A"));
/// assert_eq!(sentence.checksum(), Some(0x6a));
/// assert_eq!(sentence.encode(), raw);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sentence {
    talker: String,
    topic: String,
    fields: Vec<String>,
    /// `None` only for decoded sentences that were sent without a checksum.
    checksum: Option<u8>,
}

impl Sentence {
    pub const START: u8 = b'$';
    pub const CHECKSUM_DELIMITER: u8 = b'*';
    pub const FIELD_DELIMITER: char = ',';
    pub const TERMINATOR: &'static [u8] = b"\r\n";
    /// Length of the talker identifier, e.g., `GP`
    pub const TALKER_LEN: usize = 2;
    /// Length of the topic, or sentence type, e.g., `RMC`
    pub const TOPIC_LEN: usize = 3;

    /// Construct a sentence from its parts, computing the checksum.
    ///
    /// # Errors
    /// [Error::Framing] if `talker` is not 2 or `topic` is not 3 uppercase ASCII letters,
    /// or if a field contains a non-printable or reserved character (`$`, `*`, `,`).
    pub fn new<I>(talker: &str, topic: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        validate_code(talker, Self::TALKER_LEN, "talker")?;
        validate_code(topic, Self::TOPIC_LEN, "topic")?;
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        for (idx, field) in fields.iter().enumerate() {
            if !field.bytes().all(is_field_byte) {
                return Err(Error::Framing(format!(
                    "field {idx} contains a reserved character: {field:?}"
                )));
            }
        }

        let mut sentence = Sentence {
            talker: talker.to_string(),
            topic: topic.to_string(),
            fields,
            checksum: None,
        };
        sentence.checksum = Some(checksum::checksum(sentence.body().as_bytes()));
        Ok(sentence)
    }

    /// Like [Sentence::new], but the provided checksum must match the computed checksum
    /// exactly.
    ///
    /// # Errors
    /// [Error::Checksum] if `checksum` is not valid for the sentence, otherwise the same
    /// as [Sentence::new].
    pub fn with_checksum<I>(talker: &str, topic: &str, fields: I, checksum: u8) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let sentence = Self::new(talker, topic, fields)?;
        match sentence.checksum {
            Some(expected) if expected == checksum => Ok(sentence),
            _ => Err(Error::Checksum {
                expected: hex(sentence.checksum.unwrap_or_default()),
                actual: hex(checksum),
            }),
        }
    }

    /// Decode a single framed sentence, including the trailing CRLF.
    ///
    /// Sentences without a checksum, i.e., with no `*` before the CRLF, are accepted and
    /// have a `checksum` of `None`. When a checksum is present it must match the sentence
    /// body exactly.
    ///
    /// # Errors
    /// [Error::Framing] if the sentence does not start with `$`, does not end with CRLF,
    /// has an invalid address field, or contains non-printable characters.
    /// [Error::Checksum] if the checksum does not match or is not 2 uppercase hex digits.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        if raw.first() != Some(&Self::START) {
            return Err(Error::Framing("missing '$' prefix".to_string()));
        }
        let Some(inner) = raw.strip_suffix(Self::TERMINATOR) else {
            return Err(Error::Framing("missing CRLF terminator".to_string()));
        };
        let inner = &inner[1..];

        // A checksum is present only if the 3rd byte from the end is the delimiter
        let (body, claimed) = match inner.len().checked_sub(3) {
            Some(star) if inner[star] == Self::CHECKSUM_DELIMITER => {
                (&inner[..star], Some(&inner[star + 1..]))
            }
            _ => (inner, None),
        };

        // Checksum is verified before anything else looks at the body so any corruption
        // of the body is reported as a checksum failure.
        let checksum = match claimed {
            Some(claimed) => {
                let expected = checksum::checksum(body);
                match checksum::parse(claimed) {
                    Some(actual) if actual == expected => Some(actual),
                    _ => {
                        return Err(Error::Checksum {
                            expected: hex(expected),
                            actual: String::from_utf8_lossy(claimed).to_string(),
                        })
                    }
                }
            }
            None => {
                trace!("sentence has no checksum");
                None
            }
        };

        if let Some(pos) = body
            .iter()
            .position(|b| !(is_field_byte(*b) || *b == b','))
        {
            return Err(Error::Framing(format!(
                "invalid byte 0x{:02x} at offset {}",
                body[pos],
                pos + 1
            )));
        }
        // Cannot fail, all bytes are printable ASCII
        let body = std::str::from_utf8(body).map_err(|e| Error::Framing(e.to_string()))?;

        let mut tokens = body.split(Self::FIELD_DELIMITER);
        let address = tokens.next().unwrap_or_default();
        if address.len() != Self::TALKER_LEN + Self::TOPIC_LEN
            || !address.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(Error::Framing(format!("invalid address field {address:?}")));
        }
        let (talker, topic) = address.split_at(Self::TALKER_LEN);

        Ok(Sentence {
            talker: talker.to_string(),
            topic: topic.to_string(),
            fields: tokens.map(String::from).collect(),
            checksum,
        })
    }

    /// Encode to wire bytes, `$<body>*<checksum>\r\n`. The checksum is always computed
    /// and included, even if this sentence was decoded without one.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let body = self.body();
        let mut buf = Vec::with_capacity(body.len() + 6);
        buf.push(Self::START);
        buf.extend_from_slice(body.as_bytes());
        buf.push(Self::CHECKSUM_DELIMITER);
        buf.extend_from_slice(&checksum::compute(body.as_bytes()));
        buf.extend_from_slice(Self::TERMINATOR);
        buf
    }

    /// The checksummed portion of the sentence, i.e., the talker, topic and fields
    /// joined with commas.
    #[must_use]
    pub fn body(&self) -> String {
        let len = self.fields.iter().map(|f| f.len() + 1).sum::<usize>()
            + Self::TALKER_LEN
            + Self::TOPIC_LEN;
        let mut body = String::with_capacity(len);
        body.push_str(&self.talker);
        body.push_str(&self.topic);
        for field in &self.fields {
            body.push(Self::FIELD_DELIMITER);
            body.push_str(field);
        }
        body
    }

    #[must_use]
    pub fn talker(&self) -> &str {
        &self.talker
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// All fields following the address field. Empty fields are empty strings.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    #[must_use]
    pub fn checksum(&self) -> Option<u8> {
        self.checksum
    }

    pub(crate) fn expect_topic(&self, expected: &'static str) -> Result<()> {
        if self.topic == expected {
            Ok(())
        } else {
            Err(Error::TopicMismatch {
                expected,
                actual: self.topic.clone(),
            })
        }
    }

    pub(crate) fn expect_fields(&self, minimum: usize) -> Result<()> {
        if self.fields.len() < minimum {
            return Err(Error::FieldCount {
                actual: self.fields.len(),
                minimum,
            });
        }
        Ok(())
    }
}

impl Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.body())?;
        if let Some(checksum) = self.checksum {
            write!(f, "*{}", hex(checksum))?;
        }
        Ok(())
    }
}

fn hex(value: u8) -> String {
    String::from_utf8_lossy(&checksum::to_hex(value)).to_string()
}

fn is_field_byte(b: u8) -> bool {
    (0x20..=0x7e).contains(&b) && !matches!(b, b'$' | b'*' | b',')
}

fn validate_code(code: &str, len: usize, name: &str) -> Result<()> {
    if code.len() != len || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::Framing(format!(
            "{name} must be {len} uppercase letters, got {code:?}"
        )));
    }
    Ok(())
}
