//! Functions for encoding commands to, and decoding responses from, the MCP3204/3208

/// Start bit, sent as bit 2 of the first byte so the conversion result ends byte aligned.
const START: u8 = 0b0000_0100;

/// Mask for the result bits B11 - B8 in the second response byte.
const HIGH_NIBBLE: u8 = 0b0000_1111;

/// Encode input mode and channel into a three byte command.
///
/// ```text
/// byte0: [0b0000_0(start)(single)(D2)]
/// byte1: [0b(D1)(D0)xx_xxxx]
/// byte2: [0bxxxx_xxxx]
/// ```
///
/// The channel is not checked. Only `channel % 4` and whether `channel >= 4` reach the wire.
pub fn encode_command(single_ended: bool, channel: u8) -> [u8; 3] {
    [
        START | ((single_ended as u8) << 1) | (channel >= 4) as u8,
        (channel % 4) << 6,
        0,
    ]
}

/// Decode the 12 bit conversion result clocked out alongside a command.
///
/// The first byte and the upper nibble of the second byte are undefined or the null bit, and are
/// discarded.
pub fn decode_response(response: [u8; 3]) -> u16 {
    u16::from_be_bytes([response[1] & HIGH_NIBBLE, response[2]])
}
