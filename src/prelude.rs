//! Prelude
pub use embedded_hal::prelude::*;

// embedded-hal doesn’t yet have v2 in its prelude, so we need to
// export it ourselves
pub use embedded_hal::digital::v2::InputPin as _embedded_hal_gpio_InputPin;
pub use embedded_hal::digital::v2::OutputPin as _embedded_hal_gpio_OutputPin;
pub use embedded_hal::digital::v2::StatefulOutputPin as _embedded_hal_gpio_StatefulOutputPin;
pub use embedded_hal::digital::v2::ToggleableOutputPin as _embedded_hal_gpio_ToggleableOutputPin;

pub use crate::clock::RccExt as _stm32f4_gpio_hal_clock_RccExt;
pub use crate::gpio::GpioExt as _stm32f4_gpio_hal_gpio_GpioExt;
pub use crate::time::U32Ext as _stm32f4_gpio_hal_time_U32Ext;
