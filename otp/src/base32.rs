//! RFC 4648 base32 decoding for shared secrets.
//!
//! Input is case-insensitive and may carry trailing `=` padding. Bits left
//! over after the last whole byte are dropped.

use crate::error::DecodeError;

/// A list of all usable characters in base32.
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Characters per 40-bit group.
const CHUNK_LEN: usize = 8;

pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let cleaned = input.trim_end_matches('=').to_ascii_uppercase();
    let chars: Vec<char> = cleaned.chars().collect();

    let mut bytes = Vec::with_capacity(chars.len() * 5 / 8);
    for (chunk_index, chunk) in chars.chunks(CHUNK_LEN).enumerate() {
        let mut buffer: u64 = 0;
        let mut bits: u32 = 0;

        for (i, &c) in chunk.iter().enumerate() {
            let value = index_of(c).ok_or(DecodeError {
                character: c,
                position: chunk_index * CHUNK_LEN + i,
            })?;
            buffer = (buffer << 5) | u64::from(value);
            bits += 5;

            if bits >= 8 {
                bits -= 8;
                bytes.push((buffer >> bits) as u8);
                buffer &= (1 << bits) - 1;
            }
        }
    }

    Ok(bytes)
}

fn index_of(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&a| a == c as u8)
        .map(|i| i as u8)
}
