//! # Busy-wait delays
//!
//! [`BusyWait`] spins the core for a number of cycles derived from the frozen
//! system clock, so delays stay correct when the clock source changes. It
//! keeps the CPU busy for the whole delay; use a hardware timer when the core
//! has other work to do.
use crate::clock::Clocks;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

/// Cycle-counting delay provider
#[derive(Debug, Clone, Copy)]
pub struct BusyWait {
    sysclk_hz: u32,
}

impl BusyWait {
    pub fn new(clocks: &Clocks) -> Self {
        BusyWait {
            sysclk_hz: clocks.sysclk().0,
        }
    }

    /// Core cycles needed to wait `us` microseconds
    #[inline]
    pub fn cycles_for_us(&self, us: u32) -> u64 {
        (us as u64 * self.sysclk_hz as u64 + 999_999) / 1_000_000
    }

    #[inline]
    pub fn cycles_for_ms(&self, ms: u32) -> u64 {
        (ms as u64 * self.sysclk_hz as u64 + 999) / 1_000
    }

    fn spin(cycles: u64) {
        let mut remaining = cycles;
        while remaining > 0 {
            let chunk = remaining.min(u32::MAX as u64);
            cortex_m::asm::delay(chunk as u32);
            remaining -= chunk;
        }
    }
}

impl DelayMs<u32> for BusyWait {
    fn delay_ms(&mut self, ms: u32) {
        Self::spin(self.cycles_for_ms(ms));
    }
}

impl DelayMs<u16> for BusyWait {
    fn delay_ms(&mut self, ms: u16) {
        self.delay_ms(ms as u32);
    }
}

impl DelayMs<u8> for BusyWait {
    fn delay_ms(&mut self, ms: u8) {
        self.delay_ms(ms as u32);
    }
}

impl DelayUs<u32> for BusyWait {
    fn delay_us(&mut self, us: u32) {
        Self::spin(self.cycles_for_us(us));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_follow_sysclk() {
        let delay = BusyWait::new(&Clocks::default());
        assert_eq!(delay.cycles_for_ms(1), 16_000);
        assert_eq!(delay.cycles_for_us(10), 160);
    }

    #[test]
    fn long_delays_do_not_overflow() {
        let delay = BusyWait::new(&Clocks::default());
        assert_eq!(delay.cycles_for_ms(u32::MAX), u32::MAX as u64 * 16_000);
    }

    #[test]
    fn partial_microseconds_round_up() {
        let delay = BusyWait { sysclk_hz: 1_500_000 };
        assert_eq!(delay.cycles_for_us(1), 2);
        assert_eq!(delay.cycles_for_us(0), 0);
    }
}
