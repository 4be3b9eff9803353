//! Candidate text encodings for the input file.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};

/// A text encoding the reader is willing to try.
///
/// `encoding_rs` follows the WHATWG Encoding Standard, where the `latin1` and
/// `iso-8859-1` labels resolve to windows-1252.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
    Iso8859_1,
    Cp1252,
    Utf16,
}

impl SourceEncoding {
    /// Encodings in the order they are tried.
    pub const CANDIDATES: [SourceEncoding; 5] = [
        SourceEncoding::Utf8,
        SourceEncoding::Latin1,
        SourceEncoding::Iso8859_1,
        SourceEncoding::Cp1252,
        SourceEncoding::Utf16,
    ];

    /// Label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Cp1252 => "cp1252",
            Self::Utf16 => "utf-16",
        }
    }

    fn encoding_for(self, bytes: &[u8]) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Latin1 | Self::Iso8859_1 => {
                Encoding::for_label(b"iso-8859-1").unwrap_or(WINDOWS_1252)
            }
            Self::Cp1252 => WINDOWS_1252,
            Self::Utf16 => match Encoding::for_bom(bytes) {
                Some((encoding, _)) if encoding == UTF_16BE => UTF_16BE,
                _ => UTF_16LE,
            },
        }
    }

    /// Decodes `bytes`, returning `None` on malformed input.
    ///
    /// A leading BOM of the chosen encoding is skipped. Text containing NUL
    /// characters is rejected: it means a multi-byte file was decoded with a
    /// single-byte encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let encoding = self.encoding_for(bytes);
        let body = match Encoding::for_bom(bytes) {
            Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
            _ => bytes,
        };
        let text: Cow<'_, str> =
            encoding.decode_without_bom_handling_and_without_replacement(body)?;
        if text.contains('\0') {
            return None;
        }
        Some(text.into_owned())
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
