//! Drive the public API end to end on simulated register blocks
use embedded_hal::digital::v2::{InputPin, OutputPin};
use stm32f4_gpio_hal::{
    clock::{ClockSource, Rcc, RccRegister},
    gpio::{AltFunction, GpioRegister, Mode, PinConfig, PinError, Port, PortId, Pull, Speed},
    led::{Led, LED_PIN},
    reg::{RegisterInterface, Simulated},
    time::U32Ext,
};

type SimRcc = Rcc<Simulated<RccRegister>>;
type SimPort = Port<Simulated<GpioRegister>>;

fn board() -> (SimRcc, SimPort, SimPort) {
    (
        Rcc::new(Simulated::new()),
        Port::new(PortId::A, Simulated::new()),
        Port::new(PortId::C, Simulated::new()),
    )
}

#[test]
fn blink_from_hse() {
    let (mut rcc, porta, _) = board();
    let clocks = rcc.use_hse(8.mhz().into()).unwrap();
    assert_eq!(clocks.source(), ClockSource::Hse);

    let mut led = Led::init(&mut rcc, porta).unwrap();
    assert!(rcc.is_port_clock_enabled(PortId::A));
    let mut seen = [false; 4];
    for level in seen.iter_mut() {
        led.toggle();
        *level = led.is_on();
    }
    assert_eq!(seen, [true, false, true, false]);
}

#[test]
fn led_shares_port_a_after_release() {
    let (mut rcc, porta, _) = board();
    let mut led = Led::init(&mut rcc, porta).unwrap();
    led.on();
    let mut porta = led.release();

    // USART2 TX/RX next to the LED
    let tx = PinConfig::alternate(2, AltFunction::AF7).unwrap();
    let rx = PinConfig::alternate(3, AltFunction::AF7).unwrap();
    porta.configure(tx.with_speed(Speed::High));
    porta.configure(rx.with_pull(Pull::Up));
    assert_eq!(porta.regs().read(GpioRegister::Afrl), 0x0000_7700);
    assert_eq!(porta.output_state(LED_PIN), Ok(true));
    assert_eq!(porta.read_config(LED_PIN).map(|c| c.mode()), Ok(Mode::Output));
}

#[test]
fn button_on_another_port() {
    let (mut rcc, _, mut portc) = board();
    rcc.enable_port_clock(portc.id());
    portc.configure(PinConfig::input(13, Pull::Up).unwrap());

    portc.regs_mut().drive_input(13, true);
    assert!(portc.pin(13).unwrap().is_high().unwrap());
    portc.regs_mut().drive_input(13, false);
    let mut button = portc.pin(13).unwrap();
    assert!(button.is_low().unwrap());
    // Commanding ODR of an input pin does not change what it reads
    button.set_high().unwrap();
    assert!(button.is_low().unwrap());
}

#[test]
fn bad_input_fails_fast() {
    let (_, mut porta, _) = board();
    assert_eq!(PinConfig::output(16).err(), Some(PinError::InvalidPin(16)));
    assert_eq!(porta.write(42, true), Err(PinError::InvalidPin(42)));
    assert_eq!(Speed::try_from(4), Err(PinError::InvalidSpeed(4)));
    assert_eq!(porta.regs().read(GpioRegister::Odr), 0);
}
