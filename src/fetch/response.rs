use crate::fetch::error::FetchError;
use encoding_rs::{mem::decode_latin1, UTF_8};
use log::{debug, trace};
use std::{
    borrow::Cow,
    io::{self, Read},
};

const REPLACEMENT: char = '\u{FFFD}';

/// Candidate text encodings, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    Iso8859_1,
}

impl Charset {
    pub const CANDIDATES: [Charset; 3] = [Charset::Utf8, Charset::Latin1, Charset::Iso8859_1];

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Latin1 => "latin-1",
            Charset::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decodes in replacement mode: malformed input becomes U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> Cow<str> {
        match self {
            Charset::Utf8 => UTF_8.decode_without_bom_handling(bytes).0,
            Charset::Latin1 | Charset::Iso8859_1 => decode_latin1(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub charset: Charset,
    pub text: String,
}

/// First candidate whose decoding of `bytes` has no replacement characters.
pub fn decode_clean(bytes: &[u8]) -> Option<Decoded> {
    Charset::CANDIDATES.iter().find_map(|&charset| {
        let text = charset.decode(bytes);
        if text.contains(REPLACEMENT) {
            None
        } else {
            Some(Decoded {
                charset,
                text: text.into_owned(),
            })
        }
    })
}

/// Reads until the peer closes the stream. The whole buffer is re-decoded
/// after every chunk, so the result is always one charset applied to every
/// byte received.
pub fn read_response<R: Read>(s: &mut R, chunk_size: usize) -> Result<Decoded, FetchError> {
    let mut raw: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut current: Option<Decoded> = None;
    loop {
        let n = match s.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        raw.extend_from_slice(&chunk[..n]);
        current = decode_clean(&raw);
        trace!(
            "{} bytes buffered, charset {:?}",
            raw.len(),
            current.as_ref().map(|d| d.charset.name())
        );
    }

    if raw.is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    let decoded = current.ok_or(FetchError::UnknownEncoding)?;
    debug!("received {} bytes as {}", raw.len(), decoded.charset.name());
    Ok(decoded)
}
