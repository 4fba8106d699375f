// Logging shims. They expand to `defmt` calls when the `defmt` feature is
// enabled and to nothing otherwise, so the argument expressions are never
// evaluated on builds without a logger.

macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)+);
    };
}

macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
    };
}

macro_rules! warn {
    ($($arg:tt)+) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    };
}
