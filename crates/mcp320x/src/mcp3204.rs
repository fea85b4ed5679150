use embedded_hal::spi::SpiDevice;

use crate::{differential_inputs, read_with_mode};

/// MCP3204 driver
#[derive(Debug)]
pub struct Mcp3204<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3204<SPI> {
    /// Creates a new driver from an SPI device.
    /// Please ensure the SPI bus is in SPI mode 0, aka (0, 0).
    pub fn new(spi: SPI) -> Self {
        spi.into()
    }

    /// Read a channel and return the 12 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion will be completed in single-ended mode.
    /// If `false`, the conversion will instead use differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, ch as u8, single_ended)
    }

    /// Read a channel and return the 12 bit value as a [`u16`] in single-ended mode.
    pub fn read(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, true)
    }

    /// Read a channel pair and return the 12 bit value as a [`u16`] in differential mode.
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Run a conversion with an untyped channel number.
    ///
    /// Only channels 0 - 3 exist on the MCP3204. Anything else is sent as-is and the result is
    /// whatever the device clocks back.
    pub fn get_raw_data(&mut self, single: bool, channel: u8) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, channel, single)
    }

    /// Destroy the driver, returning the wrapped SPI device.
    pub fn destroy(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3204<SPI> {
    fn from(spi: SPI) -> Self {
        Self { spi }
    }
}

/// Channel list for MCP3204
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH0, Self::CH1, Self::CH2, Self::CH3].into_iter()
    }

    /// The `(IN+, IN-)` input pins used when this channel is read in differential mode.
    pub fn differential_inputs(self) -> (u8, u8) {
        differential_inputs(self as u8)
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::all().nth(value as usize).ok_or(value)
    }
}
