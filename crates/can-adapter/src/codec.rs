//! Payload Encoding Helpers
//!
//! Conventions for packing application values into CAN payload bytes.

/// Payload byte for a true condition
pub const BOOL_TRUE: u8 = 0x01;
/// Payload byte for a false condition
pub const BOOL_FALSE: u8 = 0x02;

/// Largest value the integer decoders return
pub const DECODE_MAX: u16 = 255;

/// Encode a condition as a payload byte (0x01 true, 0x02 false)
///
/// Zero is left unused so an all-zero payload never reads as a boolean.
pub fn encode_bool(condition: bool) -> u8 {
    if condition {
        BOOL_TRUE
    } else {
        BOOL_FALSE
    }
}

/// Decode a payload byte written by [`encode_bool`]
pub fn decode_bool(byte: u8) -> Option<bool> {
    match byte {
        BOOL_TRUE => Some(true),
        BOOL_FALSE => Some(false),
        _ => None,
    }
}

/// Decode a single byte as the high byte of a big-endian value
///
/// The result saturates at [`DECODE_MAX`], so any non-zero byte yields 255.
pub fn decode_u8(byte: u8) -> u16 {
    decode_u16(byte, 0)
}

/// Decode two bytes as a big-endian value, saturated at [`DECODE_MAX`]
pub fn decode_u16(hi: u8, lo: u8) -> u16 {
    u16::from_be_bytes([hi, lo]).min(DECODE_MAX)
}
