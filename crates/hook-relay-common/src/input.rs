//! Hook input capture.
//!
//! The agent runtime pipes arbitrary bytes on stdin. They are forwarded as
//! opaque text, so decoding never fails: invalid UTF-8 sequences become U+FFFD.

use std::io::{self, Read};

/// Read `reader` to end-of-stream and decode it permissively.
pub fn read_input(mut reader: impl Read) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode_lossy(bytes))
}

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// Valid input is moved into the `String` without copying.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
