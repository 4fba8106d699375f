//! # Reset and clock control
//!
//! System clock source selection and per-port clock gating. All access goes
//! through an [`Rcc`] handle, created on hardware by consuming the PAC
//! [`RCC`](crate::pac::RCC) peripheral:
//!
//! ```ignore
//! let dp = pac::Peripherals::take().unwrap();
//! let mut rcc = dp.RCC.constrain();
//! let clocks = rcc.use_hse(8.mhz().into())?;
//! ```
use crate::gpio::PortId;
use crate::pac;
use crate::reg::{Mmio, Register, RegisterInterface, SIM_WORDS};
use crate::time::Hertz;
use crate::Sealed;

/// Frequency of the internal RC oscillator
pub const HSI_FREQ: Hertz = Hertz(16_000_000);

/// Number of status polls before an oscillator or clock switch is declared
/// failed
pub const READY_POLLS: u32 = 50_000;

const CR_HSION: u32 = 1 << 0;
const CR_HSIRDY: u32 = 1 << 1;
const CR_HSEON: u32 = 1 << 16;
const CR_HSERDY: u32 = 1 << 17;

const CFGR_SW_SHIFT: u32 = 0;
const CFGR_SWS_SHIFT: u32 = 2;
const CFGR_SW_MASK: u32 = 0b11;

//==================================================================================================
//  Registers
//==================================================================================================

/// Registers of the RCC block used by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RccRegister {
    Cr,
    Pllcfgr,
    Cfgr,
    Ahb1enr,
}

impl Register for RccRegister {
    #[inline]
    fn offset(self) -> usize {
        match self {
            RccRegister::Cr => 0x00,
            RccRegister::Pllcfgr => 0x04,
            RccRegister::Cfgr => 0x08,
            RccRegister::Ahb1enr => 0x30,
        }
    }

    /// Oscillators come up immediately and the switch status follows the
    /// switch request
    fn sim_write(words: &mut [u32; SIM_WORDS], reg: Self, bits: u32) {
        words[reg.index()] = match reg {
            RccRegister::Cr => {
                let mut cr = bits & !(CR_HSIRDY | CR_HSERDY);
                if bits & CR_HSION != 0 {
                    cr |= CR_HSIRDY;
                }
                if bits & CR_HSEON != 0 {
                    cr |= CR_HSERDY;
                }
                cr
            }
            RccRegister::Cfgr => {
                let sw = (bits >> CFGR_SW_SHIFT) & CFGR_SW_MASK;
                (bits & !(CFGR_SW_MASK << CFGR_SWS_SHIFT)) | (sw << CFGR_SWS_SHIFT)
            }
            _ => bits,
        };
    }
}

//==================================================================================================
//  Clocks
//==================================================================================================

/// System clock source, encoded as in the CFGR SW field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    Hsi = 0b00,
    Hse = 0b01,
}

/// Frozen clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    source: ClockSource,
    sysclk: Hertz,
}

impl Clocks {
    #[inline]
    pub fn source(&self) -> ClockSource {
        self.source
    }

    #[inline]
    pub fn sysclk(&self) -> Hertz {
        self.sysclk
    }
}

/// The reset configuration: running from the HSI
impl Default for Clocks {
    fn default() -> Self {
        Clocks {
            source: ClockSource::Hsi,
            sysclk: HSI_FREQ,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// HSERDY did not rise. Usually no crystal or bypass clock is present.
    HseNotReady,
    HsiNotReady,
    /// SWS did not report the requested source
    SwitchTimeout,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::HseNotReady => f.write_str("HSE oscillator did not become ready"),
            ClockError::HsiNotReady => f.write_str("HSI oscillator did not become ready"),
            ClockError::SwitchTimeout => f.write_str("system clock switch was not acknowledged"),
        }
    }
}

//==================================================================================================
//  Rcc
//==================================================================================================

/// Handle to the RCC register block
pub struct Rcc<B> {
    regs: B,
}

impl<B: RegisterInterface<RccRegister>> Rcc<B> {
    #[inline]
    pub fn new(regs: B) -> Self {
        Rcc { regs }
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

    /// Ungate the AHB1 clock of a GPIO port. Registers of a port with a gated
    /// clock ignore writes.
    pub fn enable_port_clock(&mut self, port: PortId) {
        trace!("enable clock of GPIO{}", port);
        self.regs
            .set_bits(RccRegister::Ahb1enr, 1 << port.clock_bit());
    }

    pub fn disable_port_clock(&mut self, port: PortId) {
        trace!("disable clock of GPIO{}", port);
        self.regs
            .clear_bits(RccRegister::Ahb1enr, 1 << port.clock_bit());
    }

    pub fn is_port_clock_enabled(&self, port: PortId) -> bool {
        self.regs.read(RccRegister::Ahb1enr) & (1 << port.clock_bit()) != 0
    }

    /// Start the external oscillator and switch the system clock to it.
    /// `freq` is the frequency of the crystal or bypass clock fitted on the
    /// board.
    pub fn use_hse(&mut self, freq: Hertz) -> Result<Clocks, ClockError> {
        self.regs.set_bits(RccRegister::Cr, CR_HSEON);
        if !self.poll(|rcc| rcc.regs.read(RccRegister::Cr) & CR_HSERDY != 0) {
            warn!("HSE not ready after {} polls", READY_POLLS);
            return Err(ClockError::HseNotReady);
        }
        self.switch(ClockSource::Hse, freq)
    }

    /// Switch the system clock back to the internal oscillator
    pub fn use_hsi(&mut self) -> Result<Clocks, ClockError> {
        self.regs.set_bits(RccRegister::Cr, CR_HSION);
        if !self.poll(|rcc| rcc.regs.read(RccRegister::Cr) & CR_HSIRDY != 0) {
            warn!("HSI not ready after {} polls", READY_POLLS);
            return Err(ClockError::HsiNotReady);
        }
        self.switch(ClockSource::Hsi, HSI_FREQ)
    }

    /// Source currently reported by the switch status field
    pub fn current_source(&self) -> Option<ClockSource> {
        match self
            .regs
            .read_field(RccRegister::Cfgr, CFGR_SWS_SHIFT, CFGR_SW_MASK)
        {
            0b00 => Some(ClockSource::Hsi),
            0b01 => Some(ClockSource::Hse),
            _ => None,
        }
    }

    fn switch(&mut self, source: ClockSource, sysclk: Hertz) -> Result<Clocks, ClockError> {
        self.regs.write_field(
            RccRegister::Cfgr,
            CFGR_SW_SHIFT,
            CFGR_SW_MASK,
            source as u32,
        );
        if !self.poll(|rcc| rcc.current_source() == Some(source)) {
            warn!("clock switch to {} not acknowledged", source);
            return Err(ClockError::SwitchTimeout);
        }
        debug!("system clock: {} at {} Hz", source, sysclk.0);
        Ok(Clocks { source, sysclk })
    }

    fn poll<F: Fn(&Self) -> bool>(&self, ready: F) -> bool {
        (0..READY_POLLS).any(|_| ready(self))
    }
}

//==================================================================================================
//  Hardware handle
//==================================================================================================

/// Extension trait to constrain the PAC RCC peripheral into an [`Rcc`] handle
pub trait RccExt: Sealed {
    fn constrain(self) -> Rcc<Mmio<RccRegister>>;
}

impl Sealed for pac::RCC {}

impl RccExt for pac::RCC {
    fn constrain(self) -> Rcc<Mmio<RccRegister>> {
        // Safety: the PAC singleton is consumed, so this is the only handle
        // to the block
        Rcc::new(unsafe { Mmio::new(pac::RCC::ptr() as usize) })
    }
}
