#![cfg_attr(not(test), no_std)]

pub use stm32f4;
#[cfg(feature = "stm32f446")]
pub use stm32f4::stm32f446 as pac;
#[cfg(all(feature = "stm32f407", not(feature = "stm32f446")))]
pub use stm32f4::stm32f407 as pac;

#[cfg(not(any(feature = "stm32f446", feature = "stm32f407")))]
compile_error!("Select a device with one of the features: stm32f446, stm32f407");

#[macro_use]
mod macros;

pub mod clock;
pub mod delay;
pub mod gpio;
pub mod led;
pub mod prelude;
pub mod reg;
pub mod time;

mod private {
    /// Super trait used to mark traits with an exhaustive set of
    /// implementations
    pub trait Sealed {}
}

pub(crate) use private::Sealed;
