//! Blink the Nucleo user LED (PA5) from the external clock
//!
//! Falls back to the internal oscillator when no HSE is fitted.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4_gpio_hal::{delay::BusyWait, led::Led, pac, prelude::*};

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("-- STM32F4 Blinky --");
    let dp = pac::Peripherals::take().unwrap();
    let mut rcc = dp.RCC.constrain();
    let clocks = match rcc.use_hse(8.mhz().into()) {
        Ok(clocks) => clocks,
        Err(e) => {
            rprintln!("{}, staying on HSI", e);
            rcc.use_hsi().unwrap()
        }
    };
    rprintln!("sysclk: {} Hz", clocks.sysclk().0);

    let porta = dp.GPIOA.constrain(&mut rcc);
    let mut led = Led::init(&mut rcc, porta).unwrap();
    let mut delay = BusyWait::new(&clocks);
    loop {
        led.toggle();
        delay.delay_ms(500_u32);
    }
}
