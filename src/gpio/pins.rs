//! # Pin configuration values
//!
//! A [`PinConfig`] describes everything [`Port::configure`](super::Port::configure)
//! writes for one pin: mode, output type, speed, pull resistor and alternate
//! function. It is built once, is immutable afterwards, and is not retained by
//! the port.
//!
//! ```
//! use stm32f4_gpio_hal::gpio::{AltFunction, PinConfig, Pull, Speed};
//!
//! // USART2 TX on PA2
//! let tx = PinConfig::alternate(2, AltFunction::AF7)
//!     .unwrap()
//!     .with_speed(Speed::High)
//!     .with_pull(Pull::Up);
//! assert_eq!(tx.pin(), 2);
//! ```
//!
//! The enums carry their register encodings as discriminants. Raw encodings,
//! for example values read back from a register dump, are converted with
//! [`TryFrom<u8>`], which rejects values outside the field's domain.
use core::fmt;

/// Highest pin index of a port
pub const MAX_PIN: u8 = 15;

//==================================================================================================
//  Errors and Definitions
//==================================================================================================

/// GPIO error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin index above [`MAX_PIN`]
    InvalidPin(u8),
    InvalidMode(u8),
    InvalidOutputType(u8),
    InvalidSpeed(u8),
    InvalidPull(u8),
    InvalidAltFunction(u8),
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::InvalidPin(pin) => write!(f, "pin {} out of range 0..={}", pin, MAX_PIN),
            PinError::InvalidMode(v) => write!(f, "invalid mode encoding {:#04b}", v),
            PinError::InvalidOutputType(v) => write!(f, "invalid output type encoding {:#b}", v),
            PinError::InvalidSpeed(v) => write!(f, "invalid speed encoding {:#04b}", v),
            PinError::InvalidPull(v) => write!(f, "invalid pull encoding {:#04b}", v),
            PinError::InvalidAltFunction(v) => write!(f, "alternate function {} out of range", v),
        }
    }
}

/// Check a pin index
#[inline]
pub const fn check_pin(pin: u8) -> Result<u8, PinError> {
    if pin > MAX_PIN {
        Err(PinError::InvalidPin(pin))
    } else {
        Ok(pin)
    }
}

/// GPIO port identifiers. The discriminant is the port's enable bit in
/// RCC AHB1ENR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl PortId {
    #[inline]
    pub const fn clock_bit(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{:?}", self)
    }
}

//==================================================================================================
//  Field values
//==================================================================================================

/// MODER field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

/// OTYPER field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 1,
}

/// OSPEEDR field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low = 0b00,
    Medium = 0b01,
    Fast = 0b10,
    High = 0b11,
}

/// PUPDR field. `0b11` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None = 0b00,
    Up = 0b01,
    Down = 0b10,
}

/// Alternate function selector, one nibble of AFRL/AFRH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AltFunction {
    AF0 = 0,
    AF1 = 1,
    AF2 = 2,
    AF3 = 3,
    AF4 = 4,
    AF5 = 5,
    AF6 = 6,
    AF7 = 7,
    AF8 = 8,
    AF9 = 9,
    AF10 = 10,
    AF11 = 11,
    AF12 = 12,
    AF13 = 13,
    AF14 = 14,
    AF15 = 15,
}

impl TryFrom<u8> for Mode {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, PinError> {
        match value {
            0b00 => Ok(Mode::Input),
            0b01 => Ok(Mode::Output),
            0b10 => Ok(Mode::Alternate),
            0b11 => Ok(Mode::Analog),
            _ => Err(PinError::InvalidMode(value)),
        }
    }
}

impl TryFrom<u8> for OutputType {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, PinError> {
        match value {
            0 => Ok(OutputType::PushPull),
            1 => Ok(OutputType::OpenDrain),
            _ => Err(PinError::InvalidOutputType(value)),
        }
    }
}

impl TryFrom<u8> for Speed {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, PinError> {
        match value {
            0b00 => Ok(Speed::Low),
            0b01 => Ok(Speed::Medium),
            0b10 => Ok(Speed::Fast),
            0b11 => Ok(Speed::High),
            _ => Err(PinError::InvalidSpeed(value)),
        }
    }
}

impl TryFrom<u8> for Pull {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, PinError> {
        match value {
            0b00 => Ok(Pull::None),
            0b01 => Ok(Pull::Up),
            0b10 => Ok(Pull::Down),
            _ => Err(PinError::InvalidPull(value)),
        }
    }
}

impl TryFrom<u8> for AltFunction {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, PinError> {
        use AltFunction::*;
        const ALL: [AltFunction; 16] = [
            AF0, AF1, AF2, AF3, AF4, AF5, AF6, AF7, AF8, AF9, AF10, AF11, AF12, AF13, AF14, AF15,
        ];
        ALL.get(value as usize)
            .copied()
            .ok_or(PinError::InvalidAltFunction(value))
    }
}

//==================================================================================================
//  PinConfig
//==================================================================================================

/// Complete configuration of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pin: u8,
    mode: Mode,
    output_type: OutputType,
    speed: Speed,
    pull: Pull,
    alternate: AltFunction,
}

impl PinConfig {
    /// Reset configuration of `pin`: floating input, push-pull, low speed,
    /// AF0
    pub const fn new(pin: u8) -> Result<Self, PinError> {
        match check_pin(pin) {
            Ok(pin) => Ok(PinConfig {
                pin,
                mode: Mode::Input,
                output_type: OutputType::PushPull,
                speed: Speed::Low,
                pull: Pull::None,
                alternate: AltFunction::AF0,
            }),
            Err(e) => Err(e),
        }
    }

    pub const fn input(pin: u8, pull: Pull) -> Result<Self, PinError> {
        match Self::new(pin) {
            Ok(config) => Ok(config.with_pull(pull)),
            Err(e) => Err(e),
        }
    }

    /// Push-pull output
    pub const fn output(pin: u8) -> Result<Self, PinError> {
        match Self::new(pin) {
            Ok(config) => Ok(config.with_mode(Mode::Output)),
            Err(e) => Err(e),
        }
    }

    pub const fn alternate(pin: u8, af: AltFunction) -> Result<Self, PinError> {
        match Self::new(pin) {
            Ok(config) => Ok(config.with_mode(Mode::Alternate).with_alternate(af)),
            Err(e) => Err(e),
        }
    }

    pub const fn analog(pin: u8) -> Result<Self, PinError> {
        match Self::new(pin) {
            Ok(config) => Ok(config.with_mode(Mode::Analog)),
            Err(e) => Err(e),
        }
    }

    #[inline]
    pub const fn with_mode(self, mode: Mode) -> Self {
        PinConfig { mode, ..self }
    }

    #[inline]
    pub const fn with_output_type(self, output_type: OutputType) -> Self {
        PinConfig {
            output_type,
            ..self
        }
    }

    #[inline]
    pub const fn with_speed(self, speed: Speed) -> Self {
        PinConfig { speed, ..self }
    }

    #[inline]
    pub const fn with_pull(self, pull: Pull) -> Self {
        PinConfig { pull, ..self }
    }

    #[inline]
    pub const fn with_alternate(self, alternate: AltFunction) -> Self {
        PinConfig { alternate, ..self }
    }

    #[inline]
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub const fn output_type(&self) -> OutputType {
        self.output_type
    }

    #[inline]
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    #[inline]
    pub const fn pull(&self) -> Pull {
        self.pull
    }

    #[inline]
    pub const fn alternate_function(&self) -> AltFunction {
        self.alternate
    }
}
