//! Byte-level character-encoding detection for the fetched payload.
//!
//! The public IRVE export has shipped as UTF-8 and as windows-1252 at
//! different points in time, so the payload's encoding is sniffed rather
//! than assumed. The guess carries a confidence score, but even the
//! lowest-confidence guess is used as the best-effort default.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::PipelineError;

/// Outcome of encoding detection.
#[derive(Debug, Clone, Copy)]
pub struct Sniff {
    pub encoding: &'static Encoding,
    /// Heuristic confidence in `[0, 1]`. Informational only; no threshold
    /// has to be met.
    pub confidence: f32,
}

/// Guess the most likely encoding of `bytes`.
///
/// BOM wins outright. Otherwise a payload that validates as UTF-8 is taken
/// as UTF-8. Anything else falls back to windows-1252, which decodes every
/// byte sequence; confidence is discounted by the share of high bytes that
/// land in the C1 control range (0x80..=0x9F), printable in windows-1252
/// but essentially absent from real French text.
pub fn detect(bytes: &[u8]) -> Sniff {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Sniff {
            encoding,
            confidence: 1.0,
        };
    }

    if std::str::from_utf8(bytes).is_ok() {
        let multibyte = bytes.iter().any(|b| *b >= 0x80);
        return Sniff {
            encoding: UTF_8,
            // Pure ASCII decodes identically under every candidate.
            confidence: if multibyte { 1.0 } else { 0.8 },
        };
    }

    let high = bytes.iter().filter(|b| **b >= 0x80).count();
    let c1 = bytes
        .iter()
        .filter(|b| (0x80..=0x9F).contains(*b))
        .count();
    let confidence = if high == 0 {
        1.0
    } else {
        (1.0 - c1 as f32 / high as f32).max(0.1)
    };
    Sniff {
        encoding: WINDOWS_1252,
        confidence,
    }
}

/// Decode `bytes` with the sniffed encoding. Malformed sequences under the
/// chosen encoding abort the run.
pub fn decode(bytes: &[u8]) -> Result<(String, Sniff), PipelineError> {
    let sniff = detect(bytes);
    let (text, _, had_errors) = sniff.encoding.decode(bytes);
    if had_errors {
        return Err(PipelineError::Decode {
            encoding: sniff.encoding.name(),
        });
    }
    Ok((text.into_owned(), sniff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_payload_is_detected() {
        let bytes = "borne électrique, prise type 2".as_bytes();
        let sniff = detect(bytes);
        assert_eq!(sniff.encoding, UTF_8);
        assert_eq!(sniff.confidence, 1.0);
    }

    #[test]
    fn ascii_payload_defaults_to_utf8() {
        let sniff = detect(b"plain ascii csv,with,fields");
        assert_eq!(sniff.encoding, UTF_8);
        assert!(sniff.confidence < 1.0);
    }

    #[test]
    fn latin1_payload_falls_back_to_windows_1252() {
        // "électrique" with 0xE9 for the accented e: invalid as UTF-8.
        let bytes = b"\xE9lectrique";
        let sniff = detect(bytes);
        assert_eq!(sniff.encoding, WINDOWS_1252);

        let (text, _) = decode(bytes).unwrap();
        assert_eq!(text, "électrique");
    }

    #[test]
    fn bom_wins_with_full_confidence() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"id,nom\n1,Paris\n");
        let sniff = detect(&bytes);
        assert_eq!(sniff.encoding, UTF_8);
        assert_eq!(sniff.confidence, 1.0);

        let (text, _) = decode(&bytes).unwrap();
        assert!(text.starts_with("id,nom"));
    }

    #[test]
    fn c1_bytes_lower_confidence_but_still_decode() {
        // 0x81 is unassigned in windows-1252 and sits in the C1 range.
        let bytes = b"caf\xE9 \x81";
        let sniff = detect(bytes);
        assert_eq!(sniff.encoding, WINDOWS_1252);
        assert!(sniff.confidence < 1.0);
    }

    #[test]
    fn malformed_utf16_is_a_decode_error() {
        // UTF-16LE BOM followed by an odd number of payload bytes.
        let bytes = [0xFF, 0xFE, 0x41];
        assert!(matches!(
            decode(&bytes),
            Err(PipelineError::Decode { .. })
        ));
    }
}
