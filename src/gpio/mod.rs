//! # GPIO module
//!
//! Value-level access to the GPIO ports of the STM32F4. A [`Port`] owns the
//! register block of one port A..H and offers:
//!
//! - [`Port::configure`] to apply a [`PinConfig`] (mode, output type, speed,
//!   pull, alternate function),
//! - [`Port::write`], [`Port::read`], [`Port::output_state`] and
//!   [`Port::toggle`] for single pins,
//! - [`Port::pin`] to borrow one pin as an embedded-hal
//!   [`OutputPin`](embedded_hal::digital::v2::OutputPin) /
//!   [`InputPin`](embedded_hal::digital::v2::InputPin).
//!
//! Pin indices are checked at run time. Out-of-range indices return
//! [`PinError::InvalidPin`] and leave the registers untouched.
//!
//! ## Examples
//!
//! ```ignore
//! let dp = pac::Peripherals::take().unwrap();
//! let mut rcc = dp.RCC.constrain();
//! let mut gpiob = dp.GPIOB.constrain(&mut rcc);
//! gpiob.configure(PinConfig::output(7)?.with_speed(Speed::Fast));
//! gpiob.write(7, true)?;
//! ```
pub mod pins;
pub use pins::*;

mod port;
pub use port::*;

mod reg;
pub use reg::GpioRegister;
