use {
    crate::primitives::{Image, Primitives},
    std::marker::PhantomData,
};

/// The uniform operation set, built on the primitives of `P`.
///
/// Return values are fixed per operation no matter what the native instructions hand back:
///
/// | operation               | returns                             |
/// |-------------------------|-------------------------------------|
/// | `add32`                 | post-image                          |
/// | `subtract32`            | nothing                             |
/// | `increment32`           | pre-image                           |
/// | `decrement32`           | whether the post-image is nonzero   |
/// | `set32`                 | nothing                             |
/// | `read32`                | current value (plain load)          |
/// | `compare_and_swap32`    | pre-image                           |
/// | `exchange32`            | pre-image                           |
/// | `compare_and_swap_ptr`  | pre-image                           |
/// | `exchange_ptr`          | pre-image                           |
/// | `read_ptr`              | current pointer (plain load)        |
///
/// All functions share the safety requirements of [`Primitives`].
pub struct Contract<P>(PhantomData<P>);

impl<P: Primitives> Contract<P> {
    #[inline(always)]
    unsafe fn fetch_add(mem: *mut u32, val: u32) -> u32 {
        let r = P::exchange_add32(mem, val);
        match P::ADD_IMAGE {
            Image::Pre => r,
            Image::Post => r.wrapping_sub(val),
        }
    }

    #[inline]
    pub unsafe fn add32(mem: *mut u32, val: u32) -> u32 {
        Self::fetch_add(mem, val).wrapping_add(val)
    }

    #[inline]
    pub unsafe fn subtract32(mem: *mut u32, val: u32) {
        P::exchange_add32(mem, val.wrapping_neg());
    }

    #[inline]
    pub unsafe fn increment32(mem: *mut u32) -> u32 {
        Self::fetch_add(mem, 1)
    }

    #[inline]
    pub unsafe fn decrement32(mem: *mut u32) -> bool {
        Self::fetch_add(mem, u32::MAX) != 1
    }

    #[inline]
    pub unsafe fn set32(mem: *mut u32, val: u32) {
        P::exchange32(mem, val);
    }

    #[inline]
    pub unsafe fn read32(mem: *mut u32) -> u32 {
        P::load32(mem)
    }

    #[inline]
    pub unsafe fn compare_and_swap32(mem: *mut u32, with: u32, expected: u32) -> u32 {
        P::compare_exchange32(mem, with, expected)
    }

    #[inline]
    pub unsafe fn exchange32(mem: *mut u32, val: u32) -> u32 {
        P::exchange32(mem, val)
    }

    #[inline]
    pub unsafe fn compare_and_swap_ptr<T>(mem: *mut *mut T, with: *mut T, expected: *mut T) -> *mut T {
        P::compare_exchange_ptr(mem.cast(), with.cast(), expected.cast()).cast()
    }

    #[inline]
    pub unsafe fn exchange_ptr<T>(mem: *mut *mut T, with: *mut T) -> *mut T {
        P::exchange_ptr(mem.cast(), with.cast()).cast()
    }

    #[inline]
    pub unsafe fn read_ptr<T>(mem: *mut *mut T) -> *mut T {
        P::load_ptr(mem.cast()).cast()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::Contract,
        crate::primitives::{locked::Locked, Primitives},
        std::ptr,
    };

    macro_rules! for_each_strategy {
        ($check:ident) => {
            mod $check {
                #[test]
                fn locked() {
                    super::$check::<crate::primitives::locked::Locked>();
                }

                #[cfg(all(target_has_atomic = "32", target_has_atomic = "ptr"))]
                #[test]
                fn native() {
                    super::$check::<crate::primitives::native::Native>();
                }

                #[cfg(target_arch = "x86_64")]
                #[test]
                fn x86_asm() {
                    super::$check::<crate::primitives::x86_64::X86Asm>();
                }
            }
        };
    }

    fn add_returns_post_image<P: Primitives>() {
        let mut cell = 10u32;
        unsafe {
            assert_eq!(Contract::<P>::add32(&mut cell, 5), 15);
            assert_eq!(Contract::<P>::add32(&mut cell, 0), 15);
            assert_eq!(Contract::<P>::add32(&mut cell, u32::MAX), 14);
        }
        assert_eq!(cell, 14);
    }
    for_each_strategy!(add_returns_post_image);

    fn increment_returns_pre_image<P: Primitives>() {
        let mut cell = 5u32;
        unsafe {
            assert_eq!(Contract::<P>::increment32(&mut cell), 5);
        }
        assert_eq!(cell, 6);

        let mut cell = u32::MAX;
        unsafe {
            assert_eq!(Contract::<P>::increment32(&mut cell), u32::MAX);
        }
        assert_eq!(cell, 0);
    }
    for_each_strategy!(increment_returns_pre_image);

    fn decrement_reports_nonzero<P: Primitives>() {
        let mut cell = 2u32;
        unsafe {
            assert!(Contract::<P>::decrement32(&mut cell));
            assert_eq!(cell, 1);
            assert!(!Contract::<P>::decrement32(&mut cell));
            assert_eq!(cell, 0);
            // Wraps to u32::MAX, which is nonzero.
            assert!(Contract::<P>::decrement32(&mut cell));
        }
        assert_eq!(cell, u32::MAX);
    }
    for_each_strategy!(decrement_reports_nonzero);

    fn subtract_is_negated_add<P: Primitives>() {
        let mut cell = 7u32;
        unsafe {
            Contract::<P>::subtract32(&mut cell, 0);
            assert_eq!(cell, 7);
            Contract::<P>::subtract32(&mut cell, 3);
            assert_eq!(cell, 4);
        }

        // 2^31 is its own two's-complement negation.
        let mut cell = 0u32;
        unsafe {
            Contract::<P>::subtract32(&mut cell, 1 << 31);
            assert_eq!(cell, 1 << 31);
            Contract::<P>::subtract32(&mut cell, 1 << 31);
        }
        assert_eq!(cell, 0);
    }
    for_each_strategy!(subtract_is_negated_add);

    fn add_subtract_round_trip_at_wraparound<P: Primitives>() {
        let mut cell = 0u32;
        unsafe {
            Contract::<P>::subtract32(&mut cell, 1);
            assert_eq!(Contract::<P>::read32(&mut cell), u32::MAX);
            assert_eq!(Contract::<P>::add32(&mut cell, 1), 0);
        }
        for start in [0, 1, 1 << 31, u32::MAX - 3, u32::MAX] {
            for delta in [0, 1, 17, 1 << 31, u32::MAX] {
                let mut cell = start;
                unsafe {
                    Contract::<P>::add32(&mut cell, delta);
                    Contract::<P>::subtract32(&mut cell, delta);
                }
                assert_eq!(cell, start, "start={start:#x} delta={delta:#x}");
            }
        }
    }
    for_each_strategy!(add_subtract_round_trip_at_wraparound);

    fn set_and_read<P: Primitives>() {
        let mut cell = 1u32;
        unsafe {
            Contract::<P>::set32(&mut cell, 0xdead_beef);
            assert_eq!(Contract::<P>::read32(&mut cell), 0xdead_beef);
            Contract::<P>::set32(&mut cell, 0xdead_beef);
            assert_eq!(Contract::<P>::read32(&mut cell), 0xdead_beef);
        }
    }
    for_each_strategy!(set_and_read);

    fn compare_and_swap_hit_and_miss<P: Primitives>() {
        let mut cell = 15u32;
        unsafe {
            assert_eq!(Contract::<P>::compare_and_swap32(&mut cell, 100, 14), 15);
            assert_eq!(cell, 15);
            assert_eq!(Contract::<P>::compare_and_swap32(&mut cell, 100, 15), 15);
            assert_eq!(cell, 100);
            // Swapping in the value already stored still counts as a hit.
            assert_eq!(Contract::<P>::compare_and_swap32(&mut cell, 100, 100), 100);
        }
        assert_eq!(cell, 100);
    }
    for_each_strategy!(compare_and_swap_hit_and_miss);

    fn exchange_returns_pre_image<P: Primitives>() {
        let mut cell = 3u32;
        unsafe {
            assert_eq!(Contract::<P>::exchange32(&mut cell, 9), 3);
            assert_eq!(Contract::<P>::exchange32(&mut cell, u32::MAX), 9);
        }
        assert_eq!(cell, u32::MAX);
    }
    for_each_strategy!(exchange_returns_pre_image);

    fn pointer_operations<P: Primitives>() {
        let mut a = 1u64;
        let mut b = 2u64;
        let pa: *mut u64 = &mut a;
        let pb: *mut u64 = &mut b;
        let mut cell: *mut u64 = ptr::null_mut();
        unsafe {
            assert_eq!(Contract::<P>::compare_and_swap_ptr(&mut cell, pa, pb), ptr::null_mut());
            assert!(cell.is_null());
            assert_eq!(Contract::<P>::compare_and_swap_ptr(&mut cell, pa, ptr::null_mut()), ptr::null_mut());
            assert_eq!(cell, pa);
            assert_eq!(Contract::<P>::read_ptr(&mut cell), pa);
            assert_eq!(Contract::<P>::exchange_ptr(&mut cell, pb), pa);
            assert_eq!(Contract::<P>::exchange_ptr(&mut cell, ptr::null_mut()), pb);
        }
        assert!(cell.is_null());
    }
    for_each_strategy!(pointer_operations);

    #[test]
    fn locked_strategy_reports_post_image_natively() {
        let mut cell = 1u32;
        unsafe {
            assert_eq!(Locked::exchange_add32(&mut cell, 1), 2);
        }
    }
}
