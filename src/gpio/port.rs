use super::pins::{
    check_pin, AltFunction, Mode, OutputType, PinConfig, PinError, PortId, Pull, Speed,
};
use super::reg::GpioRegister;
use crate::clock::{Rcc, RccRegister};
use crate::pac;
use crate::reg::{Mmio, RegisterInterface};
use crate::Sealed;
use core::convert::Infallible;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};
use paste::paste;

const TWO_BITS: u32 = 0b11;
const ONE_BIT: u32 = 0b1;
const NIBBLE: u32 = 0b1111;

/// AF register and bit offset of the nibble for `pin`
#[inline]
fn af_position(pin: u8) -> (GpioRegister, u32) {
    if pin <= 7 {
        (GpioRegister::Afrl, pin as u32 * 4)
    } else {
        (GpioRegister::Afrh, (pin as u32 - 8) * 4)
    }
}

//==================================================================================================
//  Port
//==================================================================================================

/// Handle to the register block of one GPIO port
///
/// On hardware the handle is created by [`GpioExt::constrain`], which consumes
/// the PAC peripheral so the block has a single owner. Any backing implementing
/// [`RegisterInterface<GpioRegister>`] can be used, in particular
/// [`Simulated`](crate::reg::Simulated) for host tests.
///
/// Register updates done by [`configure`](Self::configure) and
/// [`set_alternate`](Self::set_alternate) are read-modify-write sequences.
/// If an interrupt handler also reconfigures pins of the same port, wrap the
/// calls in a critical section. Output writes go through BSRR and are atomic.
pub struct Port<B> {
    id: PortId,
    regs: B,
}

impl<B: RegisterInterface<GpioRegister>> Port<B> {
    #[inline]
    pub fn new(id: PortId, regs: B) -> Self {
        Port { id, regs }
    }

    #[inline]
    pub fn id(&self) -> PortId {
        self.id
    }

    /// Give back the register backing
    #[inline]
    pub fn free(self) -> B {
        self.regs
    }

    #[inline]
    pub fn regs(&self) -> &B {
        &self.regs
    }

    #[inline]
    pub fn regs_mut(&mut self) -> &mut B {
        &mut self.regs
    }

    /// Apply a pin configuration
    ///
    /// Every field is cleared before the new value is written, so
    /// reconfiguring a pin always leaves exactly the requested settings.
    /// Only the bits belonging to the pin are touched. The mode is written
    /// last so the pin never runs in its new mode with stale settings.
    pub fn configure(&mut self, config: PinConfig) {
        let pin = config.pin();
        trace!("configure {}{}: {}", self.id, pin, config);
        let shift2 = pin as u32 * 2;
        self.regs.write_field(
            GpioRegister::Otyper,
            pin as u32,
            ONE_BIT,
            config.output_type() as u32,
        );
        self.regs.write_field(
            GpioRegister::Ospeedr,
            shift2,
            TWO_BITS,
            config.speed() as u32,
        );
        self.regs
            .write_field(GpioRegister::Pupdr, shift2, TWO_BITS, config.pull() as u32);
        self.write_alternate(pin, config.alternate_function());
        self.regs
            .write_field(GpioRegister::Moder, shift2, TWO_BITS, config.mode() as u32);
    }

    /// Select the alternate function of a pin without touching its other
    /// settings
    pub fn set_alternate(&mut self, pin: u8, af: AltFunction) -> Result<(), PinError> {
        let pin = check_pin(pin)?;
        self.write_alternate(pin, af);
        Ok(())
    }

    /// Read back the configuration currently held by the registers
    pub fn read_config(&self, pin: u8) -> Result<PinConfig, PinError> {
        let pin = check_pin(pin)?;
        let shift2 = pin as u32 * 2;
        let (afr, af_shift) = af_position(pin);
        let field = |reg, shift, mask| self.regs.read_field(reg, shift, mask) as u8;
        Ok(PinConfig::new(pin)?
            .with_mode(Mode::try_from(field(GpioRegister::Moder, shift2, TWO_BITS))?)
            .with_output_type(OutputType::try_from(field(
                GpioRegister::Otyper,
                pin as u32,
                ONE_BIT,
            ))?)
            .with_speed(Speed::try_from(field(GpioRegister::Ospeedr, shift2, TWO_BITS))?)
            .with_pull(Pull::try_from(field(GpioRegister::Pupdr, shift2, TWO_BITS))?)
            .with_alternate(AltFunction::try_from(field(afr, af_shift, NIBBLE))?))
    }

    /// Drive a pin high (`true`) or low (`false`)
    pub fn write(&mut self, pin: u8, high: bool) -> Result<(), PinError> {
        let pin = check_pin(pin)?;
        self.write_pin(pin, high);
        Ok(())
    }

    /// Logic level sampled on the pin (IDR)
    pub fn read(&self, pin: u8) -> Result<bool, PinError> {
        let pin = check_pin(pin)?;
        Ok(self.read_pin(pin))
    }

    /// Level the pin is commanded to drive (ODR)
    pub fn output_state(&self, pin: u8) -> Result<bool, PinError> {
        let pin = check_pin(pin)?;
        Ok(self.output_pin(pin))
    }

    /// Invert the commanded output level of a pin
    pub fn toggle(&mut self, pin: u8) -> Result<(), PinError> {
        let pin = check_pin(pin)?;
        self.toggle_pin(pin);
        Ok(())
    }

    /// Borrow a single pin as an embedded-hal pin
    pub fn pin(&mut self, pin: u8) -> Result<PortPin<'_, B>, PinError> {
        let pin = check_pin(pin)?;
        Ok(PortPin { port: self, pin })
    }

    // The helpers below expect an already checked pin index

    #[inline]
    fn write_alternate(&mut self, pin: u8, af: AltFunction) {
        let (afr, shift) = af_position(pin);
        self.regs.write_field(afr, shift, NIBBLE, af as u32);
    }

    #[inline]
    pub(crate) fn write_pin(&mut self, pin: u8, high: bool) {
        let bits = if high { 1 << pin } else { 1 << (pin + 16) };
        self.regs.write(GpioRegister::Bsrr, bits);
    }

    #[inline]
    pub(crate) fn read_pin(&self, pin: u8) -> bool {
        self.regs.read_field(GpioRegister::Idr, pin as u32, ONE_BIT) != 0
    }

    #[inline]
    pub(crate) fn output_pin(&self, pin: u8) -> bool {
        self.regs.read_field(GpioRegister::Odr, pin as u32, ONE_BIT) != 0
    }

    #[inline]
    pub(crate) fn toggle_pin(&mut self, pin: u8) {
        let high = self.output_pin(pin);
        self.write_pin(pin, !high);
    }
}

//==================================================================================================
//  PortPin
//==================================================================================================

/// One pin of a [`Port`], borrowed for use with embedded-hal drivers
pub struct PortPin<'a, B> {
    port: &'a mut Port<B>,
    pin: u8,
}

impl<'a, B: RegisterInterface<GpioRegister>> PortPin<'a, B> {
    #[inline]
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Apply `config` to this pin. The pin index of `config` is ignored.
    pub fn configure(&mut self, config: PinConfig) -> Result<(), PinError> {
        let config = PinConfig::new(self.pin)?
            .with_mode(config.mode())
            .with_output_type(config.output_type())
            .with_speed(config.speed())
            .with_pull(config.pull())
            .with_alternate(config.alternate_function());
        self.port.configure(config);
        Ok(())
    }
}

impl<'a, B: RegisterInterface<GpioRegister>> OutputPin for PortPin<'a, B> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.write_pin(self.pin, true);
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.write_pin(self.pin, false);
        Ok(())
    }
}

impl<'a, B: RegisterInterface<GpioRegister>> InputPin for PortPin<'a, B> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.port.read_pin(self.pin))
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.port.read_pin(self.pin))
    }
}

impl<'a, B: RegisterInterface<GpioRegister>> StatefulOutputPin for PortPin<'a, B> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.port.output_pin(self.pin))
    }

    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.port.output_pin(self.pin))
    }
}

impl<'a, B: RegisterInterface<GpioRegister>> ToggleableOutputPin for PortPin<'a, B> {
    type Error = Infallible;

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.port.toggle_pin(self.pin);
        Ok(())
    }
}

//==================================================================================================
//  Hardware handles
//==================================================================================================

/// Extension trait to turn a PAC GPIO peripheral into a [`Port`]
pub trait GpioExt: Sealed {
    /// Enable the port clock and take ownership of the register block
    fn constrain<R: RegisterInterface<RccRegister>>(
        self,
        rcc: &mut Rcc<R>,
    ) -> Port<Mmio<GpioRegister>>;
}

macro_rules! gpio_ports {
    ($($P:ident),+) => {
        paste! {
            $(
                impl Sealed for pac::[<GPIO $P>] {}

                impl GpioExt for pac::[<GPIO $P>] {
                    fn constrain<R: RegisterInterface<RccRegister>>(
                        self,
                        rcc: &mut Rcc<R>,
                    ) -> Port<Mmio<GpioRegister>> {
                        rcc.enable_port_clock(PortId::$P);
                        // Safety: the PAC singleton is consumed, so this is
                        // the only handle to the block
                        let regs = unsafe { Mmio::new(pac::[<GPIO $P>]::ptr() as usize) };
                        Port::new(PortId::$P, regs)
                    }
                }
            )+
        }
    };
}

gpio_ports!(A, B, C, D, E, F, G, H);
