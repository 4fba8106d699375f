//! Blinky using only the PAC
//!
//! Switches the system clock to the HSE and blinks PA5 with raw register
//! writes.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f4_gpio_hal::pac;

const LED: u32 = 5;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    // HSEON, then wait for HSERDY
    dp.RCC.cr.modify(|r, w| unsafe { w.bits(r.bits() | (1 << 16)) });
    while dp.RCC.cr.read().bits() & (1 << 17) == 0 {}
    // SW = HSE
    dp.RCC
        .cfgr
        .modify(|r, w| unsafe { w.bits((r.bits() & !0b11) | 0b01) });
    dp.RCC
        .ahb1enr
        .modify(|r, w| unsafe { w.bits(r.bits() | 1) });
    dp.GPIOA.moder.modify(|r, w| unsafe {
        w.bits((r.bits() & !(0b11 << (LED * 2))) | (0b01 << (LED * 2)))
    });
    loop {
        dp.GPIOA.bsrr.write(|w| unsafe { w.bits(1 << LED) });
        cortex_m::asm::delay(4_000_000);
        dp.GPIOA.bsrr.write(|w| unsafe { w.bits(1 << (LED + 16)) });
        cortex_m::asm::delay(4_000_000);
    }
}
