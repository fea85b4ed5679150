//! Provides a driver for a Microchip MCP3204/3208 12 bit ADC via the `embedded-hal` ecosystem.
//!
//! Both devices share a single protocol: a three byte full-duplex exchange where the command
//! selects the input mode and channel, and the last 12 bits clocked back are the conversion.
//!
//! ```
//! # use embedded_hal_mock::eh1::spi::{Mock, Transaction};
//! use mcp320x::mcp3208::{Channel, Mcp3208};
//!
//! # let spi = Mock::new(&[
//! #     Transaction::transaction_start(),
//! #     Transaction::transfer_in_place(vec![0x06, 0x00, 0x00], vec![0x00, 0x08, 0x00]),
//! #     Transaction::transaction_end(),
//! # ]);
//! let mut mcp = Mcp3208::new(spi);
//!
//! let code = mcp.read(Channel::CH0).unwrap();
//! assert_eq!(code, 2048);
//! # mcp.destroy().done();
//! ```
//!
//! Converting the code to a voltage is up to the caller: `code * vref / 4096`.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use embedded_hal::spi::{Operation, SpiDevice};

mod encode;
pub mod transport;

#[cfg(feature = "mcp3204")]
pub mod mcp3204;

#[cfg(feature = "mcp3208")]
pub mod mcp3208;

pub use encode::{decode_response, encode_command};

/// Clock speed used when none is given, 400 kHz.
pub const DEFAULT_CLOCK_HZ: u32 = 400_000;

/// Largest code a conversion can return.
pub const MAX_CODE: u16 = 0x0FFF;

/// Internal method for reading/writing to an MCP320x class chip.
///
/// The channel is not validated, see [`encode_command`].
pub(crate) fn read_with_mode<SPI: SpiDevice>(
    spi: &mut SPI,
    channel: u8,
    single_ended: bool,
) -> Result<u16, SPI::Error> {
    let mut buffer = encode_command(single_ended, channel);

    log::trace!("mcp320x command {:02x?}", buffer);

    spi.transaction(&mut [Operation::TransferInPlace(&mut buffer)])?;

    log::trace!("mcp320x response {:02x?}", buffer);

    Ok(decode_response(buffer))
}

/// Input pins feeding IN+ and IN- for a differential conversion on `channel`.
///
/// Even channels put the lower pin of the pair on IN+, odd channels swap them.
pub(crate) fn differential_inputs(channel: u8) -> (u8, u8) {
    let low = channel & !1;
    let high = low + 1;

    if channel & 1 == 0 {
        (low, high)
    } else {
        (high, low)
    }
}
