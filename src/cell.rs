use {
    crate::{contract::Contract, primitives::Selected},
    std::{
        cell::UnsafeCell,
        fmt::{Debug, Formatter},
    },
};

type Ops = Contract<Selected>;

/// A 32-bit cell that is only ever accessed through the atomic operations.
///
/// This is the safe way to hold memory for the free functions of this crate: the cell has the
/// layout of a `u32`, lives wherever its owner puts it, and every method is one of the uniform
/// operations.
#[repr(transparent)]
pub struct AtomicCell32 {
    value: UnsafeCell<u32>,
}

unsafe impl Send for AtomicCell32 {}
unsafe impl Sync for AtomicCell32 {}

impl AtomicCell32 {
    pub const fn new(value: u32) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    pub fn into_inner(self) -> u32 {
        self.value.into_inner()
    }

    /// Exclusive access needs no synchronization.
    pub fn get_mut(&mut self) -> &mut u32 {
        self.value.get_mut()
    }

    /// The address of the stored value, for use with the free functions.
    pub const fn as_ptr(&self) -> *mut u32 {
        self.value.get()
    }

    /// Adds `val` with wraparound and returns the new value.
    #[inline]
    pub fn add(&self, val: u32) -> u32 {
        unsafe { Ops::add32(self.as_ptr(), val) }
    }

    /// Subtracts `val` with wraparound.
    #[inline]
    pub fn subtract(&self, val: u32) {
        unsafe { Ops::subtract32(self.as_ptr(), val) }
    }

    /// Adds one and returns the value from before.
    #[inline]
    pub fn increment(&self) -> u32 {
        unsafe { Ops::increment32(self.as_ptr()) }
    }

    /// Subtracts one and reports whether the result is nonzero.
    #[inline]
    pub fn decrement(&self) -> bool {
        unsafe { Ops::decrement32(self.as_ptr()) }
    }

    #[inline]
    pub fn set(&self, val: u32) {
        unsafe { Ops::set32(self.as_ptr(), val) }
    }

    /// Plain load. See [`crate::read32`].
    #[inline]
    pub fn read(&self) -> u32 {
        unsafe { Ops::read32(self.as_ptr()) }
    }

    /// Stores `with` if the cell holds `expected`. Returns the value found, which equals
    /// `expected` exactly when the store happened.
    #[inline]
    pub fn compare_and_swap(&self, with: u32, expected: u32) -> u32 {
        unsafe { Ops::compare_and_swap32(self.as_ptr(), with, expected) }
    }

    #[inline]
    pub fn exchange(&self, val: u32) -> u32 {
        unsafe { Ops::exchange32(self.as_ptr(), val) }
    }
}

impl Default for AtomicCell32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<u32> for AtomicCell32 {
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl Debug for AtomicCell32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AtomicCell32").field(&self.read()).finish()
    }
}

/// A pointer-sized cell holding an opaque address.
///
/// The cell never dereferences, owns, or frees what it points to.
#[repr(transparent)]
pub struct AtomicCellPtr<T> {
    value: UnsafeCell<*mut T>,
}

unsafe impl<T> Send for AtomicCellPtr<T> {}
unsafe impl<T> Sync for AtomicCellPtr<T> {}

impl<T> AtomicCellPtr<T> {
    pub const fn new(value: *mut T) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    pub const fn null() -> Self {
        Self::new(std::ptr::null_mut())
    }

    pub fn into_inner(self) -> *mut T {
        self.value.into_inner()
    }

    pub fn get_mut(&mut self) -> &mut *mut T {
        self.value.get_mut()
    }

    pub const fn as_ptr(&self) -> *mut *mut T {
        self.value.get()
    }

    /// Stores `with` if the cell holds `expected`. Returns the pointer found.
    #[inline]
    pub fn compare_and_swap(&self, with: *mut T, expected: *mut T) -> *mut T {
        unsafe { Ops::compare_and_swap_ptr(self.as_ptr(), with, expected) }
    }

    #[inline]
    pub fn exchange(&self, with: *mut T) -> *mut T {
        unsafe { Ops::exchange_ptr(self.as_ptr(), with) }
    }

    /// Plain load, like [`AtomicCell32::read`].
    #[inline]
    pub fn read(&self) -> *mut T {
        unsafe { Ops::read_ptr(self.as_ptr()) }
    }
}

impl<T> Default for AtomicCellPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> Debug for AtomicCellPtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AtomicCellPtr").field(&self.read()).finish()
    }
}
