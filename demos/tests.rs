//! Test image
//!
//! Runs the GPIO driver against real registers and reports over RTT.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use embedded_hal::digital::v2::{InputPin, OutputPin, ToggleableOutputPin};
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4_gpio_hal::{
    gpio::{AltFunction, PinConfig, Pull, Speed},
    led::{Led, LED_CONFIG, LED_PIN},
    pac,
    prelude::*,
};

#[allow(dead_code)]
#[derive(Debug)]
enum TestCase {
    // Tie PC0 to PC1 for these tests!
    TestBasic,
    TestPullup,
    TestPulldown,
    // Nothing needs to be connected
    Reconfigure,
    Led,
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("-- STM32F4 Test Application --");
    let dp = pac::Peripherals::take().unwrap();
    let mut rcc = dp.RCC.constrain();
    let mut gpioc = dp.GPIOC.constrain(&mut rcc);
    let test_case = TestCase::Reconfigure;

    match test_case {
        TestCase::TestBasic | TestCase::TestPulldown | TestCase::TestPullup => {
            rprintln!("Test case {:?}. Make sure to tie PC0 to PC1", test_case);
        }
        _ => {
            rprintln!("Test case {:?}", test_case);
        }
    }
    match test_case {
        TestCase::TestBasic => {
            gpioc.configure(PinConfig::output(0).unwrap());
            gpioc.configure(PinConfig::input(1, Pull::None).unwrap());
            gpioc.write(0, true).unwrap();
            assert!(gpioc.read(1).unwrap());
            gpioc.write(0, false).unwrap();
            assert!(!gpioc.read(1).unwrap());
        }
        TestCase::TestPullup => {
            gpioc.configure(PinConfig::input(1, Pull::Up).unwrap());
            assert!(gpioc.pin(1).unwrap().is_high().unwrap());
            gpioc.configure(PinConfig::output(0).unwrap());
            gpioc.pin(0).unwrap().set_low().unwrap();
            assert!(gpioc.pin(1).unwrap().is_low().unwrap());
            gpioc.configure(PinConfig::input(0, Pull::None).unwrap());
            assert!(gpioc.pin(1).unwrap().is_high().unwrap());
        }
        TestCase::TestPulldown => {
            gpioc.configure(PinConfig::input(1, Pull::Down).unwrap());
            assert!(gpioc.pin(1).unwrap().is_low().unwrap());
            gpioc.configure(PinConfig::output(0).unwrap());
            gpioc.pin(0).unwrap().set_high().unwrap();
            assert!(gpioc.pin(1).unwrap().is_high().unwrap());
            gpioc.configure(PinConfig::input(0, Pull::None).unwrap());
            assert!(gpioc.pin(1).unwrap().is_low().unwrap());
        }
        TestCase::Reconfigure => {
            let first = PinConfig::alternate(10, AltFunction::AF7)
                .unwrap()
                .with_speed(Speed::High)
                .with_pull(Pull::Down);
            gpioc.configure(first);
            assert_eq!(gpioc.read_config(10), Ok(first));
            let second = PinConfig::output(10).unwrap();
            gpioc.configure(second);
            assert_eq!(gpioc.read_config(10), Ok(second));
        }
        TestCase::Led => {
            let porta = dp.GPIOA.constrain(&mut rcc);
            let mut led = Led::init(&mut rcc, porta).unwrap();
            assert_eq!(led.port().read_config(LED_PIN), Ok(LED_CONFIG));
            for _ in 0..10 {
                led.set_high().unwrap();
                cortex_m::asm::delay(2_000_000);
                ToggleableOutputPin::toggle(&mut led).unwrap();
                cortex_m::asm::delay(2_000_000);
            }
        }
    }
    rprintln!("Test success");
    loop {
        cortex_m::asm::nop();
    }
}
