//! Hexadecimal text codec.
//!
//! Input is bare hex digits: no sign, no `0x` prefix, either case, leading
//! zeros allowed. Output is minimal-length lowercase hex, `0` for zero, with a
//! leading `-` for negative values.

use std::fmt;

use crate::big_int::{BigInt, Sign};
use crate::big_num_constants::{DIGITS, HEX_DIGITS_PER_LIMB, LIMB_BITS};
use crate::error::{Error, Result};
use crate::mag;

pub fn parse_hex(text: &str) -> Result<BigInt> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(Error::InvalidFormat { position: 0, found: None });
    }
    if let Some(position) = bytes.iter().position(|b| !b.is_ascii_hexdigit()) {
        // every byte before `position` is ASCII, so it is a char boundary
        let found = text[position..].chars().next();
        return Err(Error::InvalidFormat { position, found });
    }

    let mut mag = mag::zeroed(bytes.len().div_ceil(HEX_DIGITS_PER_LIMB))?;
    for (i, &b) in bytes.iter().rev().enumerate() {
        let nibble = (b as char).to_digit(16).unwrap_or(0);
        mag[i / HEX_DIGITS_PER_LIMB] |= nibble << ((i % HEX_DIGITS_PER_LIMB) * 4);
    }
    Ok(BigInt::from_mag(Sign::Positive, mag))
}

fn mag_hex_len(mag: &[u32]) -> usize {
    match mag.last() {
        None => 1,
        Some(&top) => {
            let top_digits = (LIMB_BITS - top.leading_zeros()).div_ceil(4) as usize;
            (mag.len() - 1) * HEX_DIGITS_PER_LIMB + top_digits
        }
    }
}

/// Exact number of bytes `to_hex` produces for `value`.
pub fn hex_len(value: &BigInt) -> usize {
    mag_hex_len(value.limbs()) + value.is_negative() as usize
}

/// Writes the digits of `mag` right-aligned into `out`, which must be exactly
/// `mag_hex_len(mag)` long.
fn render_mag(mag: &[u32], out: &mut [u8]) {
    if mag.is_empty() {
        out[0] = b'0';
        return;
    }
    let mut pos = out.len();
    for (i, &limb) in mag.iter().enumerate() {
        let digits = if i + 1 == mag.len() {
            pos
        } else {
            HEX_DIGITS_PER_LIMB
        };
        let mut val = limb;
        for _ in 0..digits {
            pos -= 1;
            out[pos] = DIGITS[(val & 0xf) as usize];
            val >>= 4;
        }
    }
    debug_assert_eq!(pos, 0);
}

pub fn to_hex(value: &BigInt) -> String {
    let mut buf = vec![0u8; hex_len(value)];
    render(value, &mut buf);
    buf.into_iter().map(char::from).collect()
}

fn render(value: &BigInt, out: &mut [u8]) {
    if value.is_negative() {
        out[0] = b'-';
        render_mag(value.limbs(), &mut out[1..]);
    } else {
        render_mag(value.limbs(), out);
    }
}

/// Renders `value` into the front of `buf` and returns the number of bytes
/// written. Nothing is written when the text would not fit. No terminator is
/// appended.
pub fn write_hex(value: &BigInt, buf: &mut [u8]) -> Result<usize> {
    let needed = hex_len(value);
    if buf.len() < needed {
        return Err(Error::BufferTooSmall { needed, capacity: buf.len() });
    }
    render(value, &mut buf[..needed]);
    Ok(needed)
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = vec![0u8; mag_hex_len(self.limbs())];
        render_mag(self.limbs(), &mut digits);
        let digits: String = digits.into_iter().map(char::from).collect();
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = vec![0u8; mag_hex_len(self.limbs())];
        render_mag(self.limbs(), &mut digits);
        let digits: String = digits.into_iter().map(|b| char::from(b.to_ascii_uppercase())).collect();
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}
