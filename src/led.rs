//! # User LED
//!
//! The Nucleo-64 user LED LD2 sits on PA5. [`Led`] wraps port A with that
//! fixed policy: pin 5, push-pull output, fast speed, no pull resistor.
//!
//! ```ignore
//! let dp = pac::Peripherals::take().unwrap();
//! let mut rcc = dp.RCC.constrain();
//! let porta = dp.GPIOA.constrain(&mut rcc);
//! let mut led = Led::init(&mut rcc, porta)?;
//! led.toggle();
//! ```
use crate::clock::{Rcc, RccRegister};
use crate::gpio::{
    AltFunction, GpioRegister, Mode, OutputType, PinConfig, PinError, Port, PortId, Pull, Speed,
};
use crate::reg::RegisterInterface;
use core::convert::Infallible;
use core::fmt;
use embedded_hal::digital::v2::{OutputPin, StatefulOutputPin, ToggleableOutputPin};

pub const LED_PORT: PortId = PortId::A;
pub const LED_PIN: u8 = 5;

pub const LED_CONFIG: PinConfig = match PinConfig::new(LED_PIN) {
    Ok(config) => config
        .with_mode(Mode::Output)
        .with_output_type(OutputType::PushPull)
        .with_speed(Speed::Fast)
        .with_pull(Pull::None)
        .with_alternate(AltFunction::AF0),
    Err(_) => panic!("LED pin out of range"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// The LED is wired to [`LED_PORT`]
    WrongPort(PortId),
    Pin(PinError),
}

impl From<PinError> for LedError {
    fn from(e: PinError) -> Self {
        LedError::Pin(e)
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::WrongPort(port) => write!(f, "LED is on {}, not {}", LED_PORT, port),
            LedError::Pin(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// The user LED
pub struct Led<B> {
    port: Port<B>,
}

impl<B: RegisterInterface<GpioRegister>> Led<B> {
    /// Ungate the port clock and configure the LED pin
    pub fn init<R: RegisterInterface<RccRegister>>(
        rcc: &mut Rcc<R>,
        mut port: Port<B>,
    ) -> Result<Self, LedError> {
        if port.id() != LED_PORT {
            return Err(LedError::WrongPort(port.id()));
        }
        rcc.enable_port_clock(LED_PORT);
        port.configure(LED_CONFIG);
        debug!("LED on {}{} ready", LED_PORT, LED_PIN);
        Ok(Led { port })
    }

    #[inline]
    pub fn on(&mut self) {
        self.port.write_pin(LED_PIN, true);
    }

    #[inline]
    pub fn off(&mut self) {
        self.port.write_pin(LED_PIN, false);
    }

    /// Read back the commanded level and drive the opposite one
    #[inline]
    pub fn toggle(&mut self) {
        self.port.toggle_pin(LED_PIN);
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.port.output_pin(LED_PIN)
    }

    /// Give back the port, for example to use the remaining pins of port A
    #[inline]
    pub fn release(self) -> Port<B> {
        self.port
    }

    #[inline]
    pub fn port(&self) -> &Port<B> {
        &self.port
    }
}

impl<B: RegisterInterface<GpioRegister>> OutputPin for Led<B> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.on();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.off();
        Ok(())
    }
}

impl<B: RegisterInterface<GpioRegister>> StatefulOutputPin for Led<B> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.is_on())
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.is_on())
    }
}

impl<B: RegisterInterface<GpioRegister>> ToggleableOutputPin for Led<B> {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Led::toggle(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::Simulated;

    fn init() -> (Rcc<Simulated<RccRegister>>, Led<Simulated<GpioRegister>>) {
        let mut rcc = Rcc::new(Simulated::<RccRegister>::new());
        let port = Port::new(PortId::A, Simulated::<GpioRegister>::new());
        let led = Led::init(&mut rcc, port).unwrap();
        (rcc, led)
    }

    #[test]
    fn init_applies_fixed_policy() {
        let (rcc, led) = init();
        let regs = led.port().regs();
        assert_eq!(rcc.regs().read(RccRegister::Ahb1enr) & 1, 1);
        assert_eq!(regs.read_field(GpioRegister::Otyper, 5, 0b1), 0);
        assert_eq!(regs.read_field(GpioRegister::Moder, 10, 0b11), 0b01);
        assert_eq!(regs.read_field(GpioRegister::Ospeedr, 10, 0b11), 0b10);
        assert_eq!(regs.read_field(GpioRegister::Pupdr, 10, 0b11), 0);
        assert_eq!(led.port().read_config(LED_PIN), Ok(LED_CONFIG));
    }

    #[test]
    fn init_overrides_stale_settings() {
        let mut rcc = Rcc::new(Simulated::<RccRegister>::new());
        let mut regs = Simulated::<GpioRegister>::new();
        regs.preload(GpioRegister::Otyper, 0xffff);
        regs.preload(GpioRegister::Ospeedr, 0xffff_ffff);
        regs.preload(GpioRegister::Pupdr, 0x5555_5555);
        let led = Led::init(&mut rcc, Port::new(PortId::A, regs)).unwrap();
        assert_eq!(led.port().read_config(LED_PIN), Ok(LED_CONFIG));
        // Other pins keep their settings
        assert_eq!(led.port().regs().read(GpioRegister::Otyper), 0xffdf);
    }

    #[test]
    fn init_rejects_other_ports() {
        let mut rcc = Rcc::new(Simulated::<RccRegister>::new());
        let port = Port::new(PortId::B, Simulated::<GpioRegister>::new());
        let result = Led::init(&mut rcc, port);
        assert_eq!(result.err(), Some(LedError::WrongPort(PortId::B)));
        assert_eq!(rcc.regs().read(RccRegister::Ahb1enr), 0);
    }

    #[test]
    fn on_and_off() {
        let (_, mut led) = init();
        led.on();
        assert!(led.is_on());
        assert_eq!(led.port().read(LED_PIN), Ok(true));
        led.off();
        assert!(!led.is_on());
        assert_eq!(led.port().read(LED_PIN), Ok(false));
    }

    #[test]
    fn toggle_twice_restores() {
        let (_, mut led) = init();
        led.on();
        led.toggle();
        assert!(!led.is_on());
        led.toggle();
        assert!(led.is_on());
    }

    #[test]
    fn embedded_hal_traits() {
        let (_, mut led) = init();
        led.set_high().unwrap();
        assert!(led.is_set_high().unwrap());
        ToggleableOutputPin::toggle(&mut led).unwrap();
        assert!(led.is_set_low().unwrap());
    }

    #[test]
    fn release_returns_the_port() {
        let (_, mut led) = init();
        led.on();
        let port = led.release();
        assert_eq!(port.id(), PortId::A);
        assert_eq!(port.output_state(LED_PIN), Ok(true));
    }
}
