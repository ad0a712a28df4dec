//! NMEA0183 sentence checksum.
//!
//! The checksum is the XOR of every byte between, but not including, the leading `$`
//! and the `*` delimiter. On the wire it is rendered as exactly 2 uppercase hex digits.

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// XOR fold of all bytes in `message`.
#[must_use]
pub fn checksum(message: &[u8]) -> u8 {
    message.iter().fold(0, |acc, b| acc ^ b)
}

/// Render a checksum value as its 2 uppercase hex digit wire form.
#[must_use]
pub fn to_hex(value: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(value >> 4) as usize],
        HEX_DIGITS[(value & 0xf) as usize],
    ]
}

/// Compute the wire form checksum for `message`, e.g., `b"6E"`. An empty message has
/// a checksum of `b"00"`.
///
/// # Example
/// ```
/// use nmea0183::checksum::compute;
///
/// assert_eq!(&compute(b"GPGSV,1,1,00"), b"79");
/// assert_eq!(&compute(b""), b"00");
/// ```
#[must_use]
pub fn compute(message: &[u8]) -> [u8; 2] {
    to_hex(checksum(message))
}

/// Parse a wire form checksum. Only exactly 2 uppercase hex digits are accepted.
#[must_use]
pub fn parse(claimed: &[u8]) -> Option<u8> {
    if claimed.len() != 2 {
        return None;
    }
    let hi = HEX_DIGITS.iter().position(|d| *d == claimed[0])?;
    let lo = HEX_DIGITS.iter().position(|d| *d == claimed[1])?;
    Some(((hi << 4) | lo) as u8)
}

/// Verify `claimed` is the checksum for `message`.
///
/// Comparison is case-sensitive so lowercase hex digits never verify. Malformed `claimed`
/// values are simply not valid.
#[must_use]
pub fn verify(message: &[u8], claimed: &[u8]) -> bool {
    compute(message).as_slice() == claimed
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000", b"6E"; "gga")]
    #[test_case(b"GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1", b"39"; "gsa")]
    #[test_case(b"GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45", b"75"; "gsv")]
    #[test_case(b"GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W", b"6A"; "rmc")]
    #[test_case(b"GPRMC,081836,A,3751.65,S,14507.36,E,000.0,360.0,130998,011.3,E,N", b"00"; "zero value")]
    #[test_case(b"", b"00"; "empty")]
    fn compute_reference(message: &[u8], expected: &[u8; 2]) {
        assert_eq!(&compute(message), expected);
        assert!(verify(message, expected));
    }

    #[test]
    fn compute_is_zero_padded() {
        assert_eq!(&to_hex(0x0a), b"0A");
        assert_eq!(&to_hex(0xf0), b"F0");
    }

    #[test]
    fn verify_is_case_sensitive() {
        let msg = b"GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000";
        assert!(!verify(msg, b"6e"));
        assert_eq!(parse(b"6e"), None);
    }

    #[test_case(b"" ; "empty")]
    #[test_case(b"6" ; "short")]
    #[test_case(b"6EE" ; "long")]
    #[test_case(b"G1" ; "not hex")]
    fn parse_rejects_malformed(claimed: &[u8]) {
        assert_eq!(parse(claimed), None);
        assert!(!verify(b"", claimed));
    }

    #[test]
    fn parse_hex() {
        assert_eq!(parse(b"00"), Some(0));
        assert_eq!(parse(b"6E"), Some(0x6e));
        assert_eq!(parse(b"FF"), Some(0xff));
    }
}
