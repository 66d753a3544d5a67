use {
    atomic_prims::{
        add32, compare_and_swap32, compare_and_swap_ptr, decrement32, exchange32, exchange_ptr,
        increment32, initialize, read32, set32, subtract32, AtomicCell32, AtomicCellPtr,
    },
    std::{ptr, sync::Arc, thread},
};

#[test]
fn add_then_compare_and_swap_across_threads() {
    initialize().unwrap();
    let cell = Arc::new(AtomicCell32::new(10));

    let a = {
        let cell = cell.clone();
        thread::spawn(move || cell.add(5))
    };
    assert_eq!(a.join().unwrap(), 15);

    let b = {
        let cell = cell.clone();
        thread::spawn(move || cell.compare_and_swap(100, 15))
    };
    assert_eq!(b.join().unwrap(), 15);
    assert_eq!(cell.read(), 100);
}

#[test]
fn free_functions_on_heap_memory() {
    initialize().unwrap();
    let mem = Box::into_raw(Box::new(5u32));
    unsafe {
        assert_eq!(increment32(mem), 5);
        assert_eq!(read32(mem), 6);
        assert_eq!(add32(mem, 4), 10);
        subtract32(mem, 10);
        assert_eq!(read32(mem), 0);
        subtract32(mem, 1);
        assert_eq!(read32(mem), 0xFFFF_FFFF);
        assert_eq!(add32(mem, 1), 0);
        set32(mem, 2);
        assert!(decrement32(mem));
        assert!(!decrement32(mem));
        assert_eq!(exchange32(mem, 77), 0);
        assert_eq!(compare_and_swap32(mem, 1, 76), 77);
        assert_eq!(compare_and_swap32(mem, 1, 77), 77);
        assert_eq!(*mem, 1);
        drop(Box::from_raw(mem));
    }
}

#[test]
fn free_pointer_functions_are_symmetric() {
    let mut target = [0u8; 2];
    let first: *mut u8 = &mut target[0];
    let second: *mut u8 = &mut target[1];
    let mut slot: *mut u8 = first;
    unsafe {
        assert_eq!(compare_and_swap_ptr(&mut slot, second, first), first);
        assert_eq!(exchange_ptr(&mut slot, ptr::null_mut()), second);
        assert_eq!(compare_and_swap_ptr(&mut slot, first, second), ptr::null_mut());
    }
    assert!(slot.is_null());
}

#[test]
fn increment_never_reports_post_image() {
    let cell = AtomicCell32::new(5);
    assert_eq!(cell.increment(), 5);
    assert_eq!(cell.read(), 6);
    assert_eq!(cell.increment(), 6);
}

#[test]
fn compare_and_swap_success_is_detected_from_return() {
    let cell = AtomicCell32::new(1);
    for expected in 0..4 {
        let before = cell.read();
        let found = cell.compare_and_swap(expected + 10, expected);
        assert_eq!(found, before);
        let swapped = found == expected;
        assert_eq!(cell.read(), if swapped { expected + 10 } else { before });
    }
}

#[test]
fn subtract_edge_values() {
    let cell = AtomicCell32::new(123);
    cell.subtract(0);
    assert_eq!(cell.read(), 123);
    cell.subtract(1 << 31);
    assert_eq!(cell.read(), 123u32.wrapping_add(1 << 31));
    cell.subtract(1 << 31);
    assert_eq!(cell.read(), 123);
}

#[test]
fn pointer_cell_holds_null_and_addresses() {
    let mut value = 9i64;
    let p: *mut i64 = &mut value;
    let cell = AtomicCellPtr::<i64>::default();
    assert_eq!(cell.compare_and_swap(p, p), ptr::null_mut());
    assert_eq!(cell.exchange(p), ptr::null_mut());
    assert_eq!(cell.compare_and_swap(ptr::null_mut(), p), p);
    assert!(cell.into_inner().is_null());
}
