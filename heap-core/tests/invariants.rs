// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use heap_core::{Allocator, Heap, HeapError};
use proptest::prelude::*;

/// §8 invariant: two `fetch_mono` calls against the same address return
/// field-equal descriptors.
#[test]
fn fetch_mono_is_idempotent() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let wrapper = allocator.int32(&mut heap, Some(42)).unwrap();

    let a = heap.fetch_mono(wrapper.address()).unwrap();
    let b = heap.fetch_mono(wrapper.address()).unwrap();
    assert_eq!(a, b);
}

/// §8 invariant: a freshly-created array always starts at length 0.
#[test]
fn new_array_is_empty() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let array = allocator.array(&mut heap).unwrap();
    assert_eq!(array.length(&heap).unwrap(), 0);
}

/// §8 invariant: appending past the embedded chunk's 8 slots must spill
/// into a freshly linked chunk rather than failing.
#[test]
fn array_append_spans_multiple_chunks() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let array = allocator.array(&mut heap).unwrap();

    for i in 0..20 {
        let element = allocator.int32(&mut heap, Some(i)).unwrap();
        array.append(&mut heap, &mut allocator, element.mono()).unwrap();
    }

    assert_eq!(array.length(&heap).unwrap(), 20);
    for i in 0..20 {
        let mono = array.index(&heap, i as usize).unwrap();
        let value = heap_core::Int32Wrapper::new(mono).read(&heap).unwrap();
        assert_eq!(value, i);
    }
}

/// §8 invariant: indexing past the current length is always `OutOfRange`,
/// never a panic or a stale read.
#[test]
fn array_index_out_of_range() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let array = allocator.array(&mut heap).unwrap();
    let element = allocator.int32(&mut heap, Some(1)).unwrap();
    array.append(&mut heap, &mut allocator, element.mono()).unwrap();

    assert!(matches!(
        array.index(&heap, 1).unwrap_err(),
        HeapError::OutOfRange { .. }
    ));
}

/// §8 invariant: `push`/`pop` are inverses and never mutate the original
/// array in place.
#[test]
fn push_then_pop_restores_original_contents() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let array = allocator.array(&mut heap).unwrap();
    let a = allocator.int32(&mut heap, Some(10)).unwrap();
    let b = allocator.int32(&mut heap, Some(20)).unwrap();
    array.append(&mut heap, &mut allocator, a.mono()).unwrap();
    array.append(&mut heap, &mut allocator, b.mono()).unwrap();

    let c = allocator.int32(&mut heap, Some(30)).unwrap();
    let pushed = array.push(&mut heap, &mut allocator, c.mono()).unwrap();
    assert_eq!(pushed.length(&heap).unwrap(), 3);
    assert_eq!(array.length(&heap).unwrap(), 2);

    let (popped, removed) = pushed.pop(&mut heap, &mut allocator).unwrap();
    assert_eq!(popped.length(&heap).unwrap(), 2);
    assert_eq!(removed, c.mono());
}

/// §8 invariant: `concat` preserves both arrays' element order.
#[test]
fn concat_preserves_order() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let left = allocator.array(&mut heap).unwrap();
    let right = allocator.array(&mut heap).unwrap();

    for i in 0..3 {
        let e = allocator.int32(&mut heap, Some(i)).unwrap();
        left.append(&mut heap, &mut allocator, e.mono()).unwrap();
    }
    for i in 3..6 {
        let e = allocator.int32(&mut heap, Some(i)).unwrap();
        right.append(&mut heap, &mut allocator, e.mono()).unwrap();
    }

    let joined = left.concat(&mut heap, &mut allocator, &right).unwrap();
    assert_eq!(joined.length(&heap).unwrap(), 6);
    for i in 0..6 {
        let mono = joined.index(&heap, i as usize).unwrap();
        let value = heap_core::Int32Wrapper::new(mono).read(&heap).unwrap();
        assert_eq!(value, i);
    }
}

/// §8 invariant: a minor collection never loses a reachable value that is
/// still referenced through the allocator's working set at the moment it
/// runs.
#[test]
fn minor_collect_preserves_allocator_reachable_values() {
    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    let wrapper = allocator.int32(&mut heap, Some(99)).unwrap();

    // A single region can't be paired with itself, so this collection is a
    // no-op and the original handle stays valid.
    heap_core::gc::minor_collect(&mut heap, &mut allocator).unwrap();
    assert_eq!(wrapper.read(&heap).unwrap(), 99);
}

proptest! {
    /// §8 invariant: writing then reading an i32 through `Int32Wrapper`
    /// round-trips exactly, for any value.
    #[test]
    fn int32_round_trips(value in any::<i32>()) {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let wrapper = allocator.int32(&mut heap, Some(value)).unwrap();
        prop_assert_eq!(wrapper.read(&heap).unwrap(), value);
    }

    /// §8 invariant: writing then reading an f64 through `Float64Wrapper`
    /// round-trips exactly, including NaN-bit-pattern-free values.
    #[test]
    fn float64_round_trips(value in any::<f64>().prop_filter("no NaN", |v| !v.is_nan())) {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let wrapper = allocator.float64(&mut heap, Some(value)).unwrap();
        prop_assert_eq!(wrapper.read(&heap).unwrap(), value);
    }

    /// §8 invariant: appending `n` elements then reading each index back
    /// in order reproduces the original sequence, for any n up to a few
    /// chunk boundaries.
    #[test]
    fn array_append_then_index_round_trips(values in prop::collection::vec(any::<i32>(), 0..40)) {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let array = allocator.array(&mut heap).unwrap();

        for &v in &values {
            let e = allocator.int32(&mut heap, Some(v)).unwrap();
            array.append(&mut heap, &mut allocator, e.mono()).unwrap();
        }

        prop_assert_eq!(array.length(&heap).unwrap() as usize, values.len());
        for (i, &expected) in values.iter().enumerate() {
            let mono = array.index(&heap, i).unwrap();
            let actual = heap_core::Int32Wrapper::new(mono).read(&heap).unwrap();
            prop_assert_eq!(actual, expected);
        }
    }
}
