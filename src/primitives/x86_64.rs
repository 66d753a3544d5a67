//! x86_64 strategy.
//!
//! `xadd`, `xchg` and `cmpxchg` with a `lock` prefix are full barriers on this architecture,
//! so every read-modify-write is sequentially consistent. `xchg` with a memory operand is
//! implicitly locked.

use {
    crate::primitives::{Image, Primitives, Strategy},
    std::arch::asm,
};

pub struct X86Asm;

impl Primitives for X86Asm {
    const STRATEGY: Strategy = Strategy::X86Asm;

    // xadd leaves the old value in the source register.
    const ADD_IMAGE: Image = Image::Pre;

    #[inline]
    unsafe fn exchange_add32(mem: *mut u32, mut val: u32) -> u32 {
        asm!(
            "lock xaddl {val:e}, ({mem})",
            val = inout(reg) val,
            mem = in(reg) mem,
            options(att_syntax, nostack)
        );
        val
    }

    #[inline]
    unsafe fn exchange32(mem: *mut u32, mut val: u32) -> u32 {
        asm!(
            "xchgl {val:e}, ({mem})",
            val = inout(reg) val,
            mem = in(reg) mem,
            options(att_syntax, nostack, preserves_flags)
        );
        val
    }

    #[inline]
    unsafe fn compare_exchange32(mem: *mut u32, with: u32, expected: u32) -> u32 {
        let prev: u32;
        asm!(
            "lock cmpxchgl {with:e}, ({mem})",
            with = in(reg) with,
            mem = in(reg) mem,
            inout("eax") expected => prev,
            options(att_syntax, nostack)
        );
        prev
    }

    #[inline]
    unsafe fn load32(mem: *mut u32) -> u32 {
        let val: u32;
        asm!(
            "movl ({mem}), {val:e}",
            mem = in(reg) mem,
            val = out(reg) val,
            options(att_syntax, nostack, readonly, preserves_flags)
        );
        val
    }

    #[inline]
    unsafe fn compare_exchange_ptr(mem: *mut *mut (), with: *mut (), expected: *mut ()) -> *mut () {
        let prev: *mut ();
        asm!(
            "lock cmpxchgq {with}, ({mem})",
            with = in(reg) with,
            mem = in(reg) mem,
            inout("rax") expected => prev,
            options(att_syntax, nostack)
        );
        prev
    }

    #[inline]
    unsafe fn exchange_ptr(mem: *mut *mut (), mut with: *mut ()) -> *mut () {
        asm!(
            "xchgq {with}, ({mem})",
            with = inout(reg) with,
            mem = in(reg) mem,
            options(att_syntax, nostack, preserves_flags)
        );
        with
    }

    #[inline]
    unsafe fn load_ptr(mem: *mut *mut ()) -> *mut () {
        let val: *mut ();
        asm!(
            "movq ({mem}), {val}",
            mem = in(reg) mem,
            val = out(reg) val,
            options(att_syntax, nostack, readonly, preserves_flags)
        );
        val
    }
}
