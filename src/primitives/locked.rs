//! Portable strategy: every operation runs under a mutex.
//!
//! Cells are mapped onto a fixed table of stripes by address, so two operations on the same
//! cell always contend on the same lock. No operation takes a second stripe while holding one.

use {
    crate::primitives::{cache_line::CacheLineAligned, Image, Primitives, Strategy},
    parking_lot::{const_mutex, Mutex, MutexGuard},
};

/// Number of lock stripes. Must be a power of two.
pub const STRIPES: usize = 64;

// Built at compile time; taking a stripe never allocates.
static LOCKS: [CacheLineAligned<Mutex<()>>; STRIPES] =
    [const { CacheLineAligned(const_mutex(())) }; STRIPES];

/// Index of the stripe guarding the cell at `addr`.
#[inline]
pub fn stripe_of(addr: usize) -> usize {
    // The low two bits are always zero for an aligned cell.
    ((addr >> 2) ^ (addr >> 9)) & (STRIPES - 1)
}

#[inline]
fn lock<T>(mem: *mut T) -> MutexGuard<'static, ()> {
    LOCKS[stripe_of(mem as usize)].0.lock()
}

pub struct Locked;

impl Primitives for Locked {
    const STRATEGY: Strategy = Strategy::Locked;

    // The new value is what we just wrote, so that is what we hand back.
    const ADD_IMAGE: Image = Image::Post;

    unsafe fn exchange_add32(mem: *mut u32, val: u32) -> u32 {
        let _guard = lock(mem);
        let new = mem.read().wrapping_add(val);
        mem.write(new);
        new
    }

    unsafe fn exchange32(mem: *mut u32, val: u32) -> u32 {
        let _guard = lock(mem);
        mem.replace(val)
    }

    unsafe fn compare_exchange32(mem: *mut u32, with: u32, expected: u32) -> u32 {
        let _guard = lock(mem);
        let prev = mem.read();
        if prev == expected {
            mem.write(with);
        }
        prev
    }

    unsafe fn load32(mem: *mut u32) -> u32 {
        // Writers hold the lock while storing non-atomically, so reads take it too.
        let _guard = lock(mem);
        mem.read()
    }

    unsafe fn compare_exchange_ptr(mem: *mut *mut (), with: *mut (), expected: *mut ()) -> *mut () {
        let _guard = lock(mem);
        let prev = mem.read();
        if prev == expected {
            mem.write(with);
        }
        prev
    }

    unsafe fn exchange_ptr(mem: *mut *mut (), with: *mut ()) -> *mut () {
        let _guard = lock(mem);
        mem.replace(with)
    }

    unsafe fn load_ptr(mem: *mut *mut ()) -> *mut () {
        let _guard = lock(mem);
        mem.read()
    }
}
