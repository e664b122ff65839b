// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use fnv::FnvHashMap;

use crate::address::HeapAddress;
use crate::allocator::Allocator;
use crate::config::REGION_HEADER_SIZE;
use crate::error::HeapResult;
use crate::heap::Heap;
use crate::mono::MonoKind;

/// Occupancy buckets the collector sorts live regions into before pairing.
/// A region's bucket is decided purely by how full it is — there is no
/// tenuring or age tracking here, just "can two of these share one region
/// after compaction".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    LessThan40,
    LessThan60,
    Skip,
}

fn classify(heap: &Heap, region_size: usize, index: usize) -> HeapResult<Bucket> {
    let occupancy = heap.region(index)?.counter() as f64 / region_size as f64;
    Ok(if occupancy <= 0.40 {
        Bucket::LessThan40
    } else if occupancy <= 0.60 {
        Bucket::LessThan60
    } else {
        Bucket::Skip
    })
}

/// Run a minor collection over the allocator's current nursery regions.
///
/// This is deliberately not a tracing collector: there is no root set to
/// scan, so every mono still gets copied forward verbatim rather than only
/// the reachable ones (see "No root set" in the design notes). What it does
/// do is reclaim space by pairing up regions that are each less than half
/// full and compacting both into a single region, rewriting the in-heap
/// pointers that moved as a result.
///
/// Any `Mono`/`HeapAddress` a caller is holding onto across this call may
/// now point at stale bytes if its region was one of the ones compacted
/// away; this is an accepted limitation, not something the collector can
/// detect from inside.
pub fn minor_collect(heap: &mut Heap, allocator: &mut Allocator) -> HeapResult<()> {
    let region_size = crate::config::REGION_SIZE;
    let candidates = allocator.regions().to_vec();

    let mut less_than_40 = Vec::new();
    let mut less_than_60 = Vec::new();
    let mut kept = Vec::new();

    for idx in &candidates {
        match classify(heap, region_size, *idx)? {
            Bucket::LessThan40 => less_than_40.push(*idx),
            Bucket::LessThan60 => less_than_60.push(*idx),
            Bucket::Skip => kept.push(*idx),
        }
    }

    // Pair each `less_than_40` region with the `less_than_60` region at the
    // same list index; whichever bucket has more entries leaves its surplus
    // for the next cycle.
    let paired_count = less_than_40.len().min(less_than_60.len());
    let surplus_40 = less_than_40.split_off(paired_count);
    let surplus_60 = less_than_60.split_off(paired_count);
    let pairs: Vec<(usize, usize)> = less_than_40.into_iter().zip(less_than_60).collect();
    kept.extend(surplus_40);
    kept.extend(surplus_60);

    // rebase[old_region_base] = new_region_base, for every source region
    // that moved. Destination regions map to themselves implicitly (absent
    // entries mean "unchanged").
    let mut rebase: FnvHashMap<HeapAddress, HeapAddress> = FnvHashMap::default();
    let mut survivors = kept;

    for (a, b) in pairs {
        let dest = heap.new_region()?;
        let dest_base = heap.region(dest)?.base();

        let mut offset = REGION_HEADER_SIZE;
        for src in [a, b] {
            let src_base = heap.region(src)?.base();
            let (src_region, dest_region) = heap.region_pair_mut(src, dest)?;
            let written = src_region.content_clone_to(dest_region, offset)?;
            rebase.insert(src_base, dest_base.offset_by(offset - REGION_HEADER_SIZE));
            offset += written;
        }
        heap.region_mut(dest)?.set_counter_raw(offset as u32);
        survivors.push(dest);
    }

    if !rebase.is_empty() {
        rewrite_pointers(heap, &survivors, &rebase)?;
    }

    allocator.replace_regions(survivors);
    Ok(())
}

/// Walk every surviving region's monos and rewrite any address field whose
/// old region base appears in `rebase`, translating it to the new base
/// while preserving its offset within that region.
fn rewrite_pointers(
    heap: &mut Heap,
    survivors: &[usize],
    rebase: &FnvHashMap<HeapAddress, HeapAddress>,
) -> HeapResult<()> {
    for &idx in survivors {
        let monos = {
            let region = heap.region(idx)?;
            let mut collected = Vec::new();
            region.traverse(|mono| {
                collected.push(mono);
                Ok(())
            })?;
            collected
        };

        for mono in monos {
            if !mono.kind.has_pointers() {
                continue;
            }
            match mono.kind {
                MonoKind::Address => {
                    rewrite_one(heap, idx, mono.value_from_offset(), rebase)?;
                }
                MonoKind::ChunkS8 => {
                    rewrite_chunk_fields(heap, idx, mono.value_from_offset(), rebase)?;
                }
                MonoKind::ArrayS8 => {
                    // array length (4 bytes) then an embedded chunk's own
                    // fields starting one byte further in (the embedded
                    // chunk's kind byte).
                    let embedded_offset = mono.value_from_offset() + 4 + 1;
                    rewrite_chunk_fields(heap, idx, embedded_offset, rebase)?;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn rewrite_chunk_fields(
    heap: &mut Heap,
    region_idx: usize,
    value_from_offset: usize,
    rebase: &FnvHashMap<HeapAddress, HeapAddress>,
) -> HeapResult<()> {
    let count = heap.region(region_idx)?.read_u8(value_from_offset)? as usize;
    for slot in 0..count {
        rewrite_one(heap, region_idx, value_from_offset + 1 + 4 * slot, rebase)?;
    }
    let next_offset = value_from_offset + 1 + 4 * crate::config::CHUNK_CAPACITY;
    rewrite_one(heap, region_idx, next_offset, rebase)
}

fn rewrite_one(
    heap: &mut Heap,
    region_idx: usize,
    field_offset: usize,
    rebase: &FnvHashMap<HeapAddress, HeapAddress>,
) -> HeapResult<()> {
    let region = heap.region(region_idx)?;
    let addr = region.read_address(field_offset)?;
    if addr.is_null() {
        return Ok(());
    }
    let (old_base, local_offset) = addr.split();
    if let Some(&new_base) = rebase.get(&old_base) {
        let new_addr = new_base.offset_by(local_offset);
        heap.region_mut(region_idx)?
            .write_address(field_offset, new_addr)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrappers::array::ArrayWrapper;

    #[test]
    fn collect_with_no_pairable_regions_is_a_no_op() {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let wrapper = allocator.int32(&mut heap, Some(7)).unwrap();
        minor_collect(&mut heap, &mut allocator).unwrap();
        assert_eq!(wrapper.read(&heap).unwrap(), 7);
    }

    #[test]
    fn a_40_and_a_60_region_get_paired_and_compacted() {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();

        // r0 lands under 40% occupancy; r1 is pushed into the 40-60% band
        // by faking its counter directly rather than allocating ~80k monos.
        let first = allocator.int32(&mut heap, Some(1)).unwrap();
        let r0 = first.mono().region_index;

        let r1 = heap.new_region().unwrap();
        allocator.replace_regions(vec![r1]);
        let second = allocator.int32(&mut heap, Some(2)).unwrap();
        assert_eq!(second.mono().region_index, r1);
        heap.region_mut(r1)
            .unwrap()
            .set_counter_raw((crate::config::REGION_SIZE / 2) as u32);
        assert_ne!(r0, r1);

        allocator.replace_regions(vec![r0, r1]);
        minor_collect(&mut heap, &mut allocator).unwrap();

        assert_eq!(allocator.regions().len(), 1);
    }

    /// §8 invariants 8 & 9: an array whose chunk slots point at elements in
    /// two different regions survives a pairing collection with its values
    /// intact and every rewritten pointer resolving to a live mono.
    #[test]
    fn minor_collect_rewrites_array_pointers_spanning_both_paired_regions() {
        use crate::wrappers::scalar::Int32Wrapper;

        let mut heap = Heap::new();
        let mut allocator = Allocator::new();

        let r_a = heap.new_region().unwrap();
        allocator.replace_regions(vec![r_a]);
        let elem_a = allocator.int32(&mut heap, Some(11)).unwrap();

        let r_b = heap.new_region().unwrap();
        allocator.replace_regions(vec![r_b]);
        let array = allocator.array(&mut heap).unwrap();
        let elem_b = allocator.int32(&mut heap, Some(22)).unwrap();

        array.append(&mut heap, &mut allocator, elem_a.mono()).unwrap();
        array.append(&mut heap, &mut allocator, elem_b.mono()).unwrap();

        heap.region_mut(r_a)
            .unwrap()
            .set_counter_raw((crate::config::REGION_SIZE * 39 / 100) as u32);
        heap.region_mut(r_b)
            .unwrap()
            .set_counter_raw((crate::config::REGION_SIZE * 55 / 100) as u32);

        allocator.replace_regions(vec![r_a, r_b]);
        minor_collect(&mut heap, &mut allocator).unwrap();
        assert_eq!(allocator.regions().len(), 1);
        let dest = allocator.regions()[0];

        // Find the array's new header by walking the merged region rather
        // than assuming which half of the pair it landed in.
        let mut found = Vec::new();
        heap.region(dest)
            .unwrap()
            .traverse(|mono| {
                if mono.kind == MonoKind::ArrayS8 {
                    found.push(mono);
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(found.len(), 1);
        let array = ArrayWrapper::new(found[0]);

        assert_eq!(array.length(&heap).unwrap(), 2);
        let values: Vec<i32> = (0..2)
            .map(|i| {
                let mono = array.index(&heap, i).unwrap();
                assert_eq!(mono.region_index, dest);
                // Resolving through `fetch_mono` again confirms the rewritten
                // address lands on a live header byte, not stale bytes.
                let refetched = heap.fetch_mono(mono.header()).unwrap();
                Int32Wrapper::new(refetched).read(&heap).unwrap()
            })
            .collect();
        assert_eq!(values, vec![11, 22]);
    }

    #[test]
    fn two_regions_in_the_same_bucket_are_left_unpaired() {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();

        let first = allocator.int32(&mut heap, Some(1)).unwrap();
        let r0 = first.mono().region_index;
        allocator.replace_regions(vec![heap.new_region().unwrap()]);
        let second = allocator.int32(&mut heap, Some(2)).unwrap();
        let r1 = second.mono().region_index;

        allocator.replace_regions(vec![r0, r1]);
        minor_collect(&mut heap, &mut allocator).unwrap();

        assert_eq!(allocator.regions().len(), 2);
    }
}
