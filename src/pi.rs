use std::cell::RefCell;

use anyhow::anyhow;
use embedded_hal_bus::spi::RefCellDevice;
use mcp320x::mcp3208::Mcp3208;
use mcp320x_pi::{code_to_volts, Args};
use rppal::gpio::Gpio;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1))?;

    log::debug!(
        "opening SPI0 at {} Hz, chip-select on BCM {}",
        args.clock_hz,
        args.cs_pin
    );

    let gpio = Gpio::new()?;

    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, args.clock_hz, Mode::Mode0)?;

    let spi = RefCell::new(spi);

    let mcp = RefCellDevice::new_no_delay(&spi, gpio.get(args.cs_pin)?.into_output());

    let mut mcp = Mcp3208::new(mcp);

    for &channel in &args.channels {
        let code = mcp
            .get_raw_data(args.single_ended, channel)
            .map_err(|err| anyhow!("conversion on channel {channel} failed: {err:?}"))?;

        match args.vref {
            Some(vref) => println!("Channel {channel}: {code} ({:.4} V)", code_to_volts(code, vref)),
            None => println!("Channel {channel}: {code}"),
        }
    }

    Ok(())
}
