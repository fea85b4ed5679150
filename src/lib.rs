//! Command line handling for the `pi` reader, kept out of the binary so it builds off-device.

use mcp320x::{DEFAULT_CLOCK_HZ, MAX_CODE};

/// BCM pin driven as chip-select when none is given.
pub const DEFAULT_CS_PIN: u8 = 24;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ArgsError {
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("`{0}` needs a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: &'static str, value: String },
    #[error("channel `{0}` is not in 0..=7")]
    InvalidChannel(String),
}

/// What to read, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub single_ended: bool,
    pub vref: Option<f64>,
    pub clock_hz: u32,
    pub cs_pin: u8,
    pub channels: Vec<u8>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            single_ended: true,
            vref: None,
            clock_hz: DEFAULT_CLOCK_HZ,
            cs_pin: DEFAULT_CS_PIN,
            channels: Vec::new(),
        }
    }
}

impl Args {
    /// Parse arguments, not including the program name.
    ///
    /// `[--differential] [--vref VOLTS] [--clock HZ] [--cs-pin BCM] [CHANNEL...]`
    ///
    /// Reads channel 0 when no channel is given.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--differential" => parsed.single_ended = false,
                "--vref" => parsed.vref = Some(value(&mut args, "--vref")?),
                "--clock" => parsed.clock_hz = value(&mut args, "--clock")?,
                "--cs-pin" => parsed.cs_pin = value(&mut args, "--cs-pin")?,
                flag if flag.starts_with("--") => {
                    return Err(ArgsError::UnknownFlag(flag.to_string()));
                }
                _ => match arg.parse::<u8>() {
                    Ok(channel) if channel < 8 => parsed.channels.push(channel),
                    _ => return Err(ArgsError::InvalidChannel(arg)),
                },
            }
        }

        if parsed.channels.is_empty() {
            parsed.channels.push(0);
        }

        Ok(parsed)
    }
}

fn value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue(flag))?;

    value
        .parse()
        .map_err(|_| ArgsError::InvalidValue { flag, value })
}

/// Input voltage for a conversion result against reference `vref`.
pub fn code_to_volts(code: u16, vref: f64) -> f64 {
    f64::from(code.min(MAX_CODE)) * vref / 4096.0
}
