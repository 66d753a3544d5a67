use {
    crate::{
        contract::Contract,
        primitives::{Primitives, Selected, Strategy},
    },
    once_cell::sync::OnceCell,
    std::ptr,
};

/// The compiled-in mechanism misbehaved during the start-up probe.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InitError {
    #[error("{strategy} atomics unusable: {op} returned {found:#x}, expected {expected:#x}")]
    Probe {
        strategy: Strategy,
        op: &'static str,
        expected: u64,
        found: u64,
    },
}

static INIT: OnceCell<Result<Strategy, InitError>> = OnceCell::new();

/// Prepares the atomic operations for use in this process.
///
/// Call once before any other operation; further calls return the cached result. On success
/// the strategy in use is returned. An error means the platform cannot provide the operations
/// and none of them may be used.
pub fn initialize() -> Result<Strategy, InitError> {
    INIT.get_or_init(|| {
        let res = probe::<Selected>();
        match &res {
            Ok(s) => crate::diag!("atomic primitives ready, strategy {}", s),
            Err(e) => crate::diag!("atomic primitives unavailable: {}", e),
        }
        res
    })
    .clone()
}

/// The strategy selected for this build target.
pub const fn strategy() -> Strategy {
    Selected::STRATEGY
}

/// Runs every operation once on a local cell and checks the fixed return conventions.
pub(crate) fn probe<P: Primitives>() -> Result<Strategy, InitError> {
    let check = |op, expected: u64, found: u64| {
        if expected == found {
            Ok(())
        } else {
            Err(InitError::Probe {
                strategy: P::STRATEGY,
                op,
                expected,
                found,
            })
        }
    };
    let mut cell = 10u32;
    let mem: *mut u32 = &mut cell;
    unsafe {
        check("add32", 15, Contract::<P>::add32(mem, 5).into())?;
        Contract::<P>::subtract32(mem, 16);
        check("subtract32", u32::MAX.into(), Contract::<P>::read32(mem).into())?;
        check("increment32", u32::MAX.into(), Contract::<P>::increment32(mem).into())?;
        Contract::<P>::set32(mem, 1);
        check("decrement32", 0, Contract::<P>::decrement32(mem).into())?;
        check("compare_and_swap32", 0, Contract::<P>::compare_and_swap32(mem, 7, 1).into())?;
        check("compare_and_swap32", 0, Contract::<P>::compare_and_swap32(mem, 7, 0).into())?;
        check("exchange32", 7, Contract::<P>::exchange32(mem, 3).into())?;
        check("read32", 3, Contract::<P>::read32(mem).into())?;

        let mut slot: *mut u32 = ptr::null_mut();
        let slot_mem: *mut *mut u32 = &mut slot;
        let prev = Contract::<P>::compare_and_swap_ptr(slot_mem, mem, ptr::null_mut());
        check("compare_and_swap_ptr", 0, prev as usize as u64)?;
        let current = Contract::<P>::read_ptr(slot_mem);
        check("read_ptr", mem as usize as u64, current as usize as u64)?;
        let prev = Contract::<P>::exchange_ptr(slot_mem, ptr::null_mut());
        check("exchange_ptr", mem as usize as u64, prev as usize as u64)?;
    }
    Ok(P::STRATEGY)
}
