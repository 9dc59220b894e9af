//! Lenient UTF-8 decoding over raw byte ranges.
//!
//! Chunks handed out by the coordinator are plain bytes and may contain
//! malformed sequences, so decoding never fails: stray continuation bytes
//! are skipped and a sequence that breaks off early is abandoned at the
//! first byte that cannot continue it.

/// Number of continuation bytes announced by a lead byte, or `None` if the
/// byte cannot start a multi-byte sequence.
fn continuation_len(lead: u8) -> Option<usize> {
    match lead {
        0xC0..=0xDF => Some(1),
        0xE0..=0xEF => Some(2),
        0xF0..=0xF7 => Some(3),
        _ => None,
    }
}

fn is_continuation(byte: u8) -> bool {
    (0x80..0xC0).contains(&byte)
}

/// Decode the next code point of `bytes` starting at `*cursor`.
///
/// Advances the cursor past every byte consumed, including skipped ones.
/// Returns `None` once the range is exhausted.
pub fn next_code_point(bytes: &[u8], cursor: &mut usize) -> Option<char> {
    'lead: while *cursor < bytes.len() {
        let lead = bytes[*cursor];
        *cursor += 1;

        if lead.is_ascii() {
            return Some(lead as char);
        }

        let Some(mut remaining) = continuation_len(lead) else {
            continue;
        };

        // Payload bits of the lead byte: 5, 4 or 3 bits for 2, 3 or 4 byte forms
        let mut scalar = u32::from(lead) & (0x7F >> (remaining + 1));

        while remaining > 0 {
            let Some(&next) = bytes.get(*cursor) else {
                return None;
            };

            if next.is_ascii() {
                *cursor += 1;
                return Some(next as char);
            }

            if !is_continuation(next) {
                // A fresh lead byte: drop the broken sequence and restart on it
                continue 'lead;
            }

            *cursor += 1;
            scalar = (scalar << 6) | u32::from(next & 0x3F);
            remaining -= 1;
        }

        if let Some(ch) = char::from_u32(scalar) {
            return Some(ch);
        }
    }

    None
}

/// Iterator over the code points of a byte range.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> CodePoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }
}

impl Iterator for CodePoints<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        next_code_point(self.bytes, &mut self.cursor)
    }
}
