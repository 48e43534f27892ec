//! Pixel strings for blits.
//!
//! A pixel string stores one hex digit per pixel (`'0'..='9'`, `'a'..='f'`,
//! `'A'..='F'`), so sprites can be written inline:
//!
//! ```
//! use tui_pix_core::decode_pixel;
//!
//! let row: Vec<u8> = b"0a9F".iter().map(|&b| decode_pixel(b)).collect();
//! assert_eq!(row, vec![0, 10, 9, 15]);
//! ```
//!
//! Any other byte decodes to 0.

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
}

static HEX_DECODE: [u8; 256] = build_table();

/// Color index for one pixel-string byte.
#[inline(always)]
pub fn decode_pixel(byte: u8) -> u8 {
    HEX_DECODE[byte as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hex_digit_decodes() {
        for (i, ch) in "0123456789abcdef".bytes().enumerate() {
            assert_eq!(decode_pixel(ch), i as u8);
        }
        for (i, ch) in "ABCDEF".bytes().enumerate() {
            assert_eq!(decode_pixel(ch), 10 + i as u8);
        }
    }

    #[test]
    fn non_hex_bytes_decode_to_zero() {
        for ch in [b' ', b'.', b'g', b'G', 0u8, 255u8] {
            assert_eq!(decode_pixel(ch), 0);
        }
    }
}
