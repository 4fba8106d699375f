use crate::reg::{Register, Simulated, SIM_WORDS};

//==================================================================================================
//  Register layout
//==================================================================================================

/// Registers of one GPIO port block
///
/// The layout is identical for every port A..H.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioRegister {
    /// Two bits per pin
    Moder,
    /// One bit per pin
    Otyper,
    /// Two bits per pin
    Ospeedr,
    /// Two bits per pin
    Pupdr,
    Idr,
    Odr,
    /// Write-only. Low half sets ODR bits, high half resets them.
    Bsrr,
    Lckr,
    /// Alternate function nibbles of pins 0..=7
    Afrl,
    /// Alternate function nibbles of pins 8..=15
    Afrh,
}

pub(super) const MODER_OUTPUT: u32 = 0b01;

impl Register for GpioRegister {
    #[inline]
    fn offset(self) -> usize {
        match self {
            GpioRegister::Moder => 0x00,
            GpioRegister::Otyper => 0x04,
            GpioRegister::Ospeedr => 0x08,
            GpioRegister::Pupdr => 0x0C,
            GpioRegister::Idr => 0x10,
            GpioRegister::Odr => 0x14,
            GpioRegister::Bsrr => 0x18,
            GpioRegister::Lckr => 0x1C,
            GpioRegister::Afrl => 0x20,
            GpioRegister::Afrh => 0x24,
        }
    }

    /// Pins in output mode read back their ODR level through IDR. Every other
    /// pin reads the externally driven level stored in the IDR word.
    fn sim_read(words: &[u32; SIM_WORDS], reg: Self) -> u32 {
        match reg {
            GpioRegister::Idr => {
                let moder = words[GpioRegister::Moder.index()];
                let outputs = (0..16u32)
                    .filter(|pin| (moder >> (pin * 2)) & 0b11 == MODER_OUTPUT)
                    .fold(0, |mask, pin| mask | (1 << pin));
                let odr = words[GpioRegister::Odr.index()];
                let idr = words[GpioRegister::Idr.index()];
                ((idr & !outputs) | (odr & outputs)) & 0xffff
            }
            GpioRegister::Bsrr => 0,
            _ => words[reg.index()],
        }
    }

    /// BSRR writes act on ODR, with set taking priority over reset. IDR is
    /// read-only.
    fn sim_write(words: &mut [u32; SIM_WORDS], reg: Self, bits: u32) {
        match reg {
            GpioRegister::Bsrr => {
                let odr = &mut words[GpioRegister::Odr.index()];
                *odr = ((*odr & !(bits >> 16)) | (bits & 0xffff)) & 0xffff;
            }
            GpioRegister::Idr => (),
            _ => words[reg.index()] = bits,
        }
    }
}

impl Simulated<GpioRegister> {
    /// Drive the external level seen by a pin that is not an output
    pub fn drive_input(&mut self, pin: u8, high: bool) {
        let idr = self.raw(GpioRegister::Idr);
        let mask = 1 << (pin & 0xf);
        self.preload(
            GpioRegister::Idr,
            if high { idr | mask } else { idr & !mask },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::RegisterInterface;

    #[test]
    fn offsets_match_reference_manual() {
        assert_eq!(GpioRegister::Pupdr.offset(), 0x0C);
        assert_eq!(GpioRegister::Bsrr.offset(), 0x18);
        assert_eq!(GpioRegister::Afrh.offset(), 0x24);
    }

    #[test]
    fn bsrr_set_and_reset() {
        let mut regs = Simulated::<GpioRegister>::new();
        regs.write(GpioRegister::Bsrr, (1 << 3) | (1 << 7));
        assert_eq!(regs.read(GpioRegister::Odr), 0b1000_1000);
        regs.write(GpioRegister::Bsrr, 1 << (3 + 16));
        assert_eq!(regs.read(GpioRegister::Odr), 0b1000_0000);
        assert_eq!(regs.read(GpioRegister::Bsrr), 0);
    }

    #[test]
    fn bsrr_set_wins_over_reset() {
        let mut regs = Simulated::<GpioRegister>::new();
        regs.write(GpioRegister::Bsrr, (1 << 4) | (1 << (4 + 16)));
        assert_eq!(regs.read(GpioRegister::Odr), 1 << 4);
    }

    #[test]
    fn idr_loops_back_outputs_only() {
        let mut regs = Simulated::<GpioRegister>::new();
        // Pin 2 output, pin 3 input
        regs.write(GpioRegister::Moder, MODER_OUTPUT << 4);
        regs.write(GpioRegister::Odr, (1 << 2) | (1 << 3));
        assert_eq!(regs.read(GpioRegister::Idr), 1 << 2);
        regs.drive_input(3, true);
        assert_eq!(regs.read(GpioRegister::Idr), (1 << 2) | (1 << 3));
        regs.drive_input(3, false);
        assert_eq!(regs.read(GpioRegister::Idr), 1 << 2);
    }

    #[test]
    fn idr_is_read_only() {
        let mut regs = Simulated::<GpioRegister>::new();
        regs.write(GpioRegister::Idr, 0xffff);
        assert_eq!(regs.read(GpioRegister::Idr), 0);
    }
}
