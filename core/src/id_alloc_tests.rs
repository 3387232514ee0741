//! Regression tests for the monotonic-counter-plus-free-list ID allocator.

use core::ffi::c_int;

use rtcsched_lib::{assert_eq_test, assert_ne_test, define_test_suite};

use crate::id_alloc::IdAllocator;

fn alloc_then_free_then_alloc_reuses_id() -> c_int {
    let ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    ids.free(a);
    let b = ids.alloc().unwrap();
    assert_eq_test!(a, b);
    0
}

fn concurrent_live_ids_are_unique() -> c_int {
    let ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    let b = ids.alloc().unwrap();
    let c = ids.alloc().unwrap();
    assert_ne_test!(a, b);
    assert_ne_test!(b, c);
    assert_ne_test!(a, c);
    0
}

fn ids_start_at_one_and_are_positive() -> c_int {
    let ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    assert_eq_test!(a, 1);
    0
}

fn free_list_is_lifo() -> c_int {
    let ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    let b = ids.alloc().unwrap();
    ids.free(a);
    ids.free(b);
    // Most recently freed comes back first.
    assert_eq_test!(ids.alloc().unwrap(), b);
    assert_eq_test!(ids.alloc().unwrap(), a);
    0
}

define_test_suite!(
    id_alloc,
    [
        alloc_then_free_then_alloc_reuses_id,
        concurrent_live_ids_are_unique,
        ids_start_at_one_and_are_positive,
        free_list_is_lifo,
    ]
);
