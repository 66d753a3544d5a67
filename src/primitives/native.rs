//! Strategy for targets whose standard library provides 32-bit and pointer-width atomics.

use {
    crate::primitives::{Image, Primitives, Strategy},
    std::sync::atomic::{
        AtomicPtr, AtomicU32,
        Ordering::{Relaxed, SeqCst},
    },
};

pub struct Native;

impl Primitives for Native {
    const STRATEGY: Strategy = Strategy::Native;
    const ADD_IMAGE: Image = Image::Pre;

    #[inline]
    unsafe fn exchange_add32(mem: *mut u32, val: u32) -> u32 {
        AtomicU32::from_ptr(mem).fetch_add(val, SeqCst)
    }

    #[inline]
    unsafe fn exchange32(mem: *mut u32, val: u32) -> u32 {
        AtomicU32::from_ptr(mem).swap(val, SeqCst)
    }

    #[inline]
    unsafe fn compare_exchange32(mem: *mut u32, with: u32, expected: u32) -> u32 {
        match AtomicU32::from_ptr(mem).compare_exchange(expected, with, SeqCst, SeqCst) {
            Ok(prev) | Err(prev) => prev,
        }
    }

    #[inline]
    unsafe fn load32(mem: *mut u32) -> u32 {
        AtomicU32::from_ptr(mem).load(Relaxed)
    }

    #[inline]
    unsafe fn compare_exchange_ptr(mem: *mut *mut (), with: *mut (), expected: *mut ()) -> *mut () {
        match AtomicPtr::from_ptr(mem).compare_exchange(expected, with, SeqCst, SeqCst) {
            Ok(prev) | Err(prev) => prev,
        }
    }

    #[inline]
    unsafe fn exchange_ptr(mem: *mut *mut (), with: *mut ()) -> *mut () {
        AtomicPtr::from_ptr(mem).swap(with, SeqCst)
    }

    #[inline]
    unsafe fn load_ptr(mem: *mut *mut ()) -> *mut () {
        AtomicPtr::from_ptr(mem).load(Relaxed)
    }
}
