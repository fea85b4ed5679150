//! Adapts a lock/select/exchange style SPI transport into an [`SpiDevice`].
//!
//! Some hosts expose the SPI bus as a shared object with explicit locking and chip-select
//! control rather than through `embedded-hal`. [`TransportDevice`] wraps such a transport so the
//! drivers in this crate can use it, running each transaction as
//! `lock -> select -> exchange... -> unselect -> unlock`. The release half of that sequence is
//! tied to guard drops, so it also runs when an exchange fails.

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

use crate::DEFAULT_CLOCK_HZ;

/// Words moved per exchange when an operation has no in-place buffer.
const SCRATCH_LEN: usize = 16;

/// A shared SPI bus with explicit mutual exclusion and chip-select control.
pub trait SpiTransport: ErrorType {
    /// Apply the chip-select line and clock speed used by later transactions.
    /// Must not put anything on the wire.
    fn configure(&mut self, chip_select: u8, clock_hz: u32) -> Result<(), Self::Error>;

    /// Take exclusive ownership of the bus.
    fn lock(&mut self) -> Result<(), Self::Error>;

    /// Give up exclusive ownership of the bus.
    fn unlock(&mut self);

    /// Assert the configured chip-select line.
    fn select(&mut self) -> Result<(), Self::Error>;

    /// De-assert the configured chip-select line.
    fn unselect(&mut self);

    /// Full-duplex transfer. Each word in `words` is sent and replaced by the word received.
    fn exchange(&mut self, words: &mut [u8]) -> Result<(), Self::Error>;

    /// Pause with the device still selected. Transports with no way to wait may ignore this.
    fn delay_ns(&mut self, _ns: u32) {}
}

/// [`SpiDevice`] over a [`SpiTransport`], bound to one chip-select line and clock speed.
#[derive(Debug)]
pub struct TransportDevice<T> {
    transport: T,
    chip_select: u8,
    clock_hz: u32,
}

impl<T: SpiTransport> TransportDevice<T> {
    /// Configure `transport` for the device on `chip_select`, clocked at `clock_hz`.
    /// No bus I/O happens here.
    pub fn new(mut transport: T, chip_select: u8, clock_hz: u32) -> Result<Self, T::Error> {
        transport.configure(chip_select, clock_hz)?;

        log::debug!("spi transport configured, cs {chip_select} at {clock_hz} Hz");

        Ok(Self {
            transport,
            chip_select,
            clock_hz,
        })
    }

    /// Same as [`TransportDevice::new`] at [`DEFAULT_CLOCK_HZ`].
    pub fn with_default_clock(transport: T, chip_select: u8) -> Result<Self, T::Error> {
        Self::new(transport, chip_select, DEFAULT_CLOCK_HZ)
    }

    pub fn chip_select(&self) -> u8 {
        self.chip_select
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Destroy the device, returning the wrapped transport.
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: SpiTransport> ErrorType for TransportDevice<T> {
    type Error = T::Error;
}

impl<T: SpiTransport> SpiDevice for TransportDevice<T> {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut bus = BusLock::acquire(&mut self.transport)?;
        let mut selected = ChipSelect::assert(&mut *bus.transport)?;

        for operation in operations {
            run(&mut *selected.transport, operation)?;
        }

        // `selected` drops before `bus`, so unselect always precedes unlock
        Ok(())
    }
}

/// Holds the bus lock until dropped.
struct BusLock<'a, T: SpiTransport> {
    transport: &'a mut T,
}

impl<'a, T: SpiTransport> BusLock<'a, T> {
    fn acquire(transport: &'a mut T) -> Result<Self, T::Error> {
        transport.lock()?;
        Ok(Self { transport })
    }
}

impl<T: SpiTransport> Drop for BusLock<'_, T> {
    fn drop(&mut self) {
        self.transport.unlock();
    }
}

/// Holds chip-select asserted until dropped.
struct ChipSelect<'a, T: SpiTransport> {
    transport: &'a mut T,
}

impl<'a, T: SpiTransport> ChipSelect<'a, T> {
    fn assert(transport: &'a mut T) -> Result<Self, T::Error> {
        transport.select()?;
        Ok(Self { transport })
    }
}

impl<T: SpiTransport> Drop for ChipSelect<'_, T> {
    fn drop(&mut self) {
        self.transport.unselect();
    }
}

fn run<T: SpiTransport>(
    transport: &mut T,
    operation: &mut Operation<'_, u8>,
) -> Result<(), T::Error> {
    match operation {
        Operation::TransferInPlace(words) => transport.exchange(words),
        Operation::Read(words) => {
            words.fill(0);
            transport.exchange(words)
        }
        Operation::Write(words) => {
            let mut scratch = [0; SCRATCH_LEN];

            for chunk in words.chunks(SCRATCH_LEN) {
                let scratch = &mut scratch[..chunk.len()];
                scratch.copy_from_slice(chunk);
                transport.exchange(scratch)?;
            }

            Ok(())
        }
        Operation::Transfer(read, write) => {
            // Clock out the longer of the two, padding writes with zero and dropping extra reads
            let len = read.len().max(write.len());
            let mut scratch = [0; SCRATCH_LEN];
            let mut offset = 0;

            while offset < len {
                let chunk = &mut scratch[..(len - offset).min(SCRATCH_LEN)];

                for (index, word) in chunk.iter_mut().enumerate() {
                    *word = write.get(offset + index).copied().unwrap_or(0);
                }

                transport.exchange(chunk)?;

                for (index, word) in chunk.iter().enumerate() {
                    if let Some(slot) = read.get_mut(offset + index) {
                        *slot = *word;
                    }
                }

                offset += chunk.len();
            }

            Ok(())
        }
        Operation::DelayNs(ns) => {
            transport.delay_ns(*ns);
            Ok(())
        }
    }
}
