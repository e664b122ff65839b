// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::address::HeapAddress;
use crate::config::CHUNK_CAPACITY;
use crate::error::{HeapError, HeapResult};
use crate::heap::Heap;
use crate::mono::Mono;

/// Typed view over a CHUNK_S8 mono — a fixed 8-slot bucket of element
/// pointers plus a link to the next chunk.
///
/// A chunk may be a stand-alone mono or the chunk embedded inside an
/// ARRAY_S8's own bytes; both are addressed the same way, so this wrapper
/// doesn't need to know which it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWrapper {
    mono: Mono,
}

impl ChunkWrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    fn length_offset(&self) -> usize {
        self.mono.value_from_offset()
    }

    fn slot_offset(&self, i: usize) -> usize {
        self.mono.value_from_offset() + 1 + 4 * i
    }

    fn next_offset(&self) -> usize {
        self.mono.value_from_offset() + 1 + 4 * CHUNK_CAPACITY
    }

    pub fn length(&self, heap: &Heap) -> HeapResult<u8> {
        heap.region(self.mono.region_index)?
            .read_u8(self.length_offset())
    }

    /// Append `element`'s header address to the next free slot.
    pub fn append(&self, heap: &mut Heap, element: Mono) -> HeapResult<()> {
        let len = self.length(heap)?;
        if len as usize >= CHUNK_CAPACITY {
            return Err(HeapError::ChunkFull {
                address: self.address().as_u64(),
                capacity: CHUNK_CAPACITY,
            });
        }
        let region = heap.region_mut(self.mono.region_index)?;
        region.write_address(self.slot_offset(len as usize), element.header())?;
        region.write_u8(self.length_offset(), len + 1)?;
        Ok(())
    }

    pub fn index(&self, heap: &Heap, i: usize) -> HeapResult<Mono> {
        let len = self.length(heap)? as usize;
        if i >= len {
            return Err(HeapError::OutOfRange { offset: i, size: len });
        }
        let addr = heap
            .region(self.mono.region_index)?
            .read_address(self.slot_offset(i))?;
        heap.fetch_mono(addr)
    }

    pub fn traverse_addresses<F: FnMut(usize, HeapAddress) -> HeapResult<()>>(
        &self,
        heap: &Heap,
        mut visit: F,
    ) -> HeapResult<()> {
        let len = self.length(heap)? as usize;
        let region = heap.region(self.mono.region_index)?;
        for i in 0..len {
            visit(i, region.read_address(self.slot_offset(i))?)?;
        }
        Ok(())
    }

    pub fn set_next(&self, heap: &mut Heap, addr: HeapAddress) -> HeapResult<()> {
        heap.region_mut(self.mono.region_index)?
            .write_address(self.next_offset(), addr)
    }

    pub fn fetch_next(&self, heap: &Heap) -> HeapResult<HeapAddress> {
        heap.region(self.mono.region_index)?
            .read_address(self.next_offset())
    }
}
