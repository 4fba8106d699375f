//! # Register access
//!
//! Peripheral drivers in this crate never dereference raw pointers directly.
//! Every register block is described by a [`Register`] enum naming its
//! registers and their byte offsets, and all accesses go through the
//! [`RegisterInterface`] trait. Two backings are provided:
//!
//! - [`Mmio`], which performs volatile accesses at `base + offset` and is what
//!   the hardware handles use;
//! - [`Simulated`], a plain word array standing in for the peripheral. It lets
//!   the drivers be exercised on the host and models the few hardware side
//!   effects the drivers rely on (see [`Register::sim_read`] and
//!   [`Register::sim_write`]).
use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};

/// Number of 32-bit words held by a [`Simulated`] block. Covers every offset
/// used by the register enums of this crate.
pub const SIM_WORDS: usize = 64;

/// A named register inside a peripheral register block
pub trait Register: Copy + Eq {
    /// Byte offset of the register from the block base address
    fn offset(self) -> usize;

    /// Word index of the register inside a [`Simulated`] block
    #[inline]
    fn index(self) -> usize {
        self.offset() / 4
    }

    /// Value a read of this register returns on a simulated block
    #[inline]
    fn sim_read(words: &[u32; SIM_WORDS], reg: Self) -> u32 {
        words[reg.index()]
    }

    /// Store a write to this register on a simulated block
    #[inline]
    fn sim_write(words: &mut [u32; SIM_WORDS], reg: Self, bits: u32) {
        words[reg.index()] = bits;
    }
}

/// Access to one register block
///
/// Any modification requires `&mut self`, so a handle owning the backing is
/// the only way to change the registers it covers.
pub trait RegisterInterface<R: Register> {
    /// Read the full 32-bit register
    fn read(&self, reg: R) -> u32;

    /// Write the full 32-bit register
    fn write(&mut self, reg: R, bits: u32);

    /// Read-modify-write. Not atomic with respect to interrupt handlers
    /// touching the same register.
    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: R, f: F) {
        let bits = self.read(reg);
        self.write(reg, f(bits));
    }

    /// Replace the field `mask << shift` with `value`, leaving every other bit
    /// untouched. `value` is truncated to the field width.
    #[inline]
    fn write_field(&mut self, reg: R, shift: u32, mask: u32, value: u32) {
        self.modify(reg, |r| (r & !(mask << shift)) | ((value & mask) << shift));
    }

    /// Extract the field `mask << shift`
    #[inline]
    fn read_field(&self, reg: R, shift: u32, mask: u32) -> u32 {
        (self.read(reg) >> shift) & mask
    }

    #[inline]
    fn set_bits(&mut self, reg: R, mask: u32) {
        self.modify(reg, |r| r | mask);
    }

    #[inline]
    fn clear_bits(&mut self, reg: R, mask: u32) {
        self.modify(reg, |r| r & !mask);
    }
}

//==================================================================================================
//  Mmio
//==================================================================================================

/// Volatile access to a memory-mapped register block
pub struct Mmio<R> {
    base: usize,
    _regs: PhantomData<R>,
}

impl<R: Register> Mmio<R> {
    /// Create a new backing for the block at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the address of a register block laid out as described by
    /// `R`, and the caller must guarantee that at most one [`Mmio`] exists for
    /// that block at any time.
    #[inline]
    pub const unsafe fn new(base: usize) -> Self {
        Mmio {
            base,
            _regs: PhantomData,
        }
    }

    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn ptr(&self, reg: R) -> *mut u32 {
        (self.base + reg.offset()) as *mut u32
    }
}

impl<R: Register> RegisterInterface<R> for Mmio<R> {
    #[inline(always)]
    fn read(&self, reg: R) -> u32 {
        // Safety: the constructor contract guarantees a valid register block
        unsafe { read_volatile(self.ptr(reg)) }
    }

    #[inline(always)]
    fn write(&mut self, reg: R, bits: u32) {
        // Safety: the constructor contract guarantees a valid register block
        unsafe { write_volatile(self.ptr(reg), bits) }
    }
}

//==================================================================================================
//  Simulated
//==================================================================================================

/// Software-backed register block
pub struct Simulated<R> {
    words: [u32; SIM_WORDS],
    _regs: PhantomData<R>,
}

impl<R: Register> Simulated<R> {
    /// A block with every register cleared
    pub const fn new() -> Self {
        Simulated {
            words: [0; SIM_WORDS],
            _regs: PhantomData,
        }
    }

    /// Overwrite the stored register content, bypassing any simulated side
    /// effect. Used to preload reset values or externally driven state.
    pub fn preload(&mut self, reg: R, bits: u32) {
        self.words[reg.index()] = bits;
    }

    /// Raw stored register content, bypassing any simulated side effect
    pub fn raw(&self, reg: R) -> u32 {
        self.words[reg.index()]
    }
}

impl<R: Register> Default for Simulated<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Register> RegisterInterface<R> for Simulated<R> {
    #[inline]
    fn read(&self, reg: R) -> u32 {
        R::sim_read(&self.words, reg)
    }

    #[inline]
    fn write(&mut self, reg: R, bits: u32) {
        R::sim_write(&mut self.words, reg, bits)
    }
}
