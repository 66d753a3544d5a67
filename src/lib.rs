//! Atomic operations on caller-owned 32-bit and pointer-sized memory with one fixed contract on
//! every target.
//!
//! The mechanism behind the operations is chosen when the crate is compiled:
//!
//! | target                                      | strategy               |
//! |---------------------------------------------|------------------------|
//! | feature `force-locked`                      | [`Strategy::Locked`]   |
//! | `x86_64`                                    | [`Strategy::X86Asm`]   |
//! | 32-bit and pointer-width atomics available  | [`Strategy::Native`]   |
//! | anything else                               | [`Strategy::Locked`]   |
//!
//! Every read-modify-write is sequentially consistent. On the locked strategy callers may wait
//! for another thread's operation on a cell that shares their lock stripe, but never longer than
//! that one operation.
//!
//! Call [`initialize`] once per process before using any operation.
//!
//! # Safety
//!
//! The free functions take raw pointers. For each call, `mem` must be non-null, aligned for its
//! width, and valid for reads and writes until the call returns. While a cell is shared between
//! threads it must only be accessed through these functions. [`AtomicCell32`] and
//! [`AtomicCellPtr`] uphold all of this for you.

pub use {
    cell::{AtomicCell32, AtomicCellPtr},
    contract::Contract,
    init::{initialize, strategy, InitError},
    primitives::{Image, Primitives, Selected, Strategy},
};

mod cell;
mod contract;
pub mod diag;
mod init;
pub mod primitives;

type Ops = Contract<Selected>;

/// Adds `val` with wraparound and returns the value after the update.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn add32(mem: *mut u32, val: u32) -> u32 {
    Ops::add32(mem, val)
}

/// Subtracts `val` with wraparound, by adding its two's-complement negation.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn subtract32(mem: *mut u32, val: u32) {
    Ops::subtract32(mem, val)
}

/// Adds one and returns the value from **before** the update.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn increment32(mem: *mut u32) -> u32 {
    Ops::increment32(mem)
}

/// Subtracts one and returns `true` if the result is nonzero.
///
/// The resulting value itself is not available; reading it afterwards races with other writers.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn decrement32(mem: *mut u32) -> bool {
    Ops::decrement32(mem)
}

/// Stores `val` unconditionally.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn set32(mem: *mut u32, val: u32) {
    Ops::set32(mem, val)
}

/// Loads the current value.
///
/// This is the weakest operation in the set: a plain load with no ordering against concurrent
/// writers beyond ordinary visibility. It never observes a torn value.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn read32(mem: *mut u32) -> u32 {
    Ops::read32(mem)
}

/// Stores `with` iff the cell holds `expected`, and returns the value it held before.
///
/// The swap happened exactly when the returned value equals `expected`.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn compare_and_swap32(mem: *mut u32, with: u32, expected: u32) -> u32 {
    Ops::compare_and_swap32(mem, with, expected)
}

/// Stores `val` and returns the value it replaced.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn exchange32(mem: *mut u32, val: u32) -> u32 {
    Ops::exchange32(mem, val)
}

/// Pointer-width [`compare_and_swap32`]. The pointers are never dereferenced.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn compare_and_swap_ptr<T>(mem: *mut *mut T, with: *mut T, expected: *mut T) -> *mut T {
    Ops::compare_and_swap_ptr(mem, with, expected)
}

/// Pointer-width [`exchange32`]. The pointers are never dereferenced.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn exchange_ptr<T>(mem: *mut *mut T, with: *mut T) -> *mut T {
    Ops::exchange_ptr(mem, with)
}

/// Pointer-width [`read32`]: a plain load of the stored address.
///
/// # Safety
///
/// See the [crate-level requirements](crate#safety).
#[inline]
pub unsafe fn read_ptr<T>(mem: *mut *mut T) -> *mut T {
    Ops::read_ptr(mem)
}
