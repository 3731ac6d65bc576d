//! z-base-32 encoding of binary digests.
//!
//! Alphabet and bit packing follow the canonical z-base-32 definition: 5 bits
//! per output character, most significant bits first, no padding. The encoded
//! digest becomes a public lookup path segment that other WKD software must
//! reproduce independently, so this transform has to match bit for bit.

/// z-base-32 alphabet (differs from RFC 4648 base32 in both order and case).
const ALPHABET: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// Encodes `data` as z-base-32 without padding.
///
/// Output length is `ceil(len * 8 / 5)` characters; trailing bits short of a
/// full 5-bit group are left-shifted to fill the final character.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[(buffer >> bits) as usize & 0x1f] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[(buffer << (5 - bits)) as usize & 0x1f] as char);
    }
    out
}
