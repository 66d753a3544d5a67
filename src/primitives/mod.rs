//! Raw native mechanisms, one per build target.
//!
//! Each strategy exposes the same small set of primitives with whatever return convention its
//! native instructions have. [`crate::Contract`] turns them into the uniform operation
//! set.

use {cfg_if::cfg_if, std::fmt};

mod cache_line;
pub mod locked;

#[cfg(all(target_has_atomic = "32", target_has_atomic = "ptr"))]
pub mod native;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

cfg_if! {
    if #[cfg(feature = "force-locked")] {
        pub type Selected = locked::Locked;
    } else if #[cfg(target_arch = "x86_64")] {
        pub type Selected = x86_64::X86Asm;
    } else if #[cfg(all(target_has_atomic = "32", target_has_atomic = "ptr"))] {
        pub type Selected = native::Native;
    } else {
        pub type Selected = locked::Locked;
    }
}

/// The mechanism backing the atomic operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// `lock`-prefixed x86_64 instructions emitted through inline assembly.
    X86Asm,
    /// The `core::sync::atomic` types viewed over caller memory.
    Native,
    /// A table of mutexes selected by cell address.
    Locked,
}

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::X86Asm => "x86-asm",
            Strategy::Native => "native",
            Strategy::Locked => "locked",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which value a read-modify-write primitive hands back.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Image {
    /// The value stored immediately before the update.
    Pre,
    /// The value stored immediately after the update.
    Post,
}

/// A native atomic mechanism.
///
/// # Safety
///
/// Every function requires `mem` to be non-null, aligned for its width, valid for reads and
/// writes for the duration of the call, and only ever accessed through the primitives of one
/// strategy while shared between threads.
pub trait Primitives {
    const STRATEGY: Strategy;

    /// What [`Self::exchange_add32`] returns.
    const ADD_IMAGE: Image;

    /// Adds `val` with wraparound. Returns [`Self::ADD_IMAGE`].
    unsafe fn exchange_add32(mem: *mut u32, val: u32) -> u32;

    /// Stores `val`, returns the pre-image.
    unsafe fn exchange32(mem: *mut u32, val: u32) -> u32;

    /// Stores `with` iff the cell holds `expected`. Returns the pre-image either way.
    unsafe fn compare_exchange32(mem: *mut u32, with: u32, expected: u32) -> u32;

    /// Plain load. Not ordered against concurrent writers beyond ordinary visibility.
    unsafe fn load32(mem: *mut u32) -> u32;

    /// Pointer-width [`Self::compare_exchange32`].
    unsafe fn compare_exchange_ptr(mem: *mut *mut (), with: *mut (), expected: *mut ()) -> *mut ();

    /// Pointer-width [`Self::exchange32`].
    unsafe fn exchange_ptr(mem: *mut *mut (), with: *mut ()) -> *mut ();

    /// Pointer-width [`Self::load32`].
    unsafe fn load_ptr(mem: *mut *mut ()) -> *mut ();
}
