// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::address::HeapAddress;
use crate::allocator::Allocator;
use crate::config::CHUNK_CAPACITY;
use crate::error::{HeapError, HeapResult};
use crate::heap::Heap;
use crate::mono::{Mono, MonoKind};
use crate::wrappers::chunk::ChunkWrapper;

/// Typed view over an ARRAY_S8 mono: a length counter plus a chunk list
/// whose first link is embedded directly in the array's own bytes.
///
/// Arrays are immutable from the guest's point of view: every structural
/// operation below returns a *new* array, sharing element monos with the
/// source rather than copying them (safe because elements are scalar-leaf
/// today; see "Sharing between immutable arrays" in the design notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayWrapper {
    mono: Mono,
}

impl ArrayWrapper {
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

    fn embedded_chunk_header_offset(&self) -> usize {
        self.mono.value_from_offset() + 4
    }

    fn embedded_chunk(&self) -> ChunkWrapper {
        let header = HeapAddress::from_parts(
            self.mono.region_index,
            self.embedded_chunk_header_offset(),
        );
        ChunkWrapper::new(Mono::new(self.mono.region_index, MonoKind::ChunkS8, header))
    }

    /// Write the embedded chunk's kind byte. Must run exactly once, right
    /// after the array mono itself is created — the rest of the embedded
    /// chunk (count, slots, next) is already zero because fresh region
    /// bytes are zero.
    pub(crate) fn init_embedded_chunk_header(&self, heap: &mut Heap) -> HeapResult<()> {
        heap.region_mut(self.mono.region_index)?
            .write_u8(self.embedded_chunk_header_offset(), MonoKind::ChunkS8.as_byte())
    }

    pub fn length(&self, heap: &Heap) -> HeapResult<u32> {
        heap.region(self.mono.region_index)?
            .read_u32(self.length_offset())
    }

    fn set_length(&self, heap: &mut Heap, len: u32) -> HeapResult<()> {
        heap.region_mut(self.mono.region_index)?
            .write_u32(self.length_offset(), len)
    }

    /// Walk the chunk list to the chunk holding slot `i`, without bounds
    /// checking against the array's length. Used by both `index` (which
    /// checks first) and `append` (which may need to extend the list).
    fn chunk_for_slot(&self, heap: &Heap, i: usize) -> HeapResult<ChunkWrapper> {
        let chunk_index = i / CHUNK_CAPACITY;
        let mut chunk = self.embedded_chunk();
        for _ in 0..chunk_index {
            let next = chunk.fetch_next(heap)?;
            if next.is_null() {
                return Err(HeapError::OutOfRange {
                    offset: i,
                    size: i,
                });
            }
            chunk = ChunkWrapper::new(heap.fetch_mono(next)?);
        }
        Ok(chunk)
    }

    pub fn index(&self, heap: &Heap, i: usize) -> HeapResult<Mono> {
        let len = self.length(heap)? as usize;
        if i >= len {
            return Err(HeapError::OutOfRange { offset: i, size: len });
        }
        let chunk = self.chunk_for_slot(heap, i)?;
        chunk.index(heap, i % CHUNK_CAPACITY)
    }

    /// Append `element`'s mono to the end of the array, allocating a new
    /// chunk and linking it in if the current tail chunk is full.
    pub fn append(&self, heap: &mut Heap, allocator: &mut Allocator, element: Mono) -> HeapResult<()> {
        let len = self.length(heap)?;
        let target_index = len as usize / CHUNK_CAPACITY;

        let mut chunk = self.embedded_chunk();
        for _ in 0..target_index {
            let next = chunk.fetch_next(heap)?;
            chunk = if next.is_null() {
                let new_chunk = allocator.chunk(heap)?;
                chunk.set_next(heap, new_chunk.address())?;
                new_chunk
            } else {
                ChunkWrapper::new(heap.fetch_mono(next)?)
            };
        }

        chunk.append(heap, element)?;
        self.set_length(heap, len + 1)
    }

    /// Produce a new array holding the same elements as this one.
    pub fn clone_array(&self, heap: &mut Heap, allocator: &mut Allocator) -> HeapResult<ArrayWrapper> {
        let len = self.length(heap)?;
        let new_array = allocator.array(heap)?;
        for i in 0..len {
            let element = self.index(heap, i as usize)?;
            new_array.append(heap, allocator, element)?;
        }
        Ok(new_array)
    }

    /// Inclusive-bounds slice `[from, to]`. Fails with `OutOfRange` if
    /// `from > to` or `to` is past the last valid index.
    pub fn slice(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
        from: usize,
        to: usize,
    ) -> HeapResult<ArrayWrapper> {
        let len = self.length(heap)? as usize;
        if len == 0 || from > to || to >= len {
            return Err(HeapError::OutOfRange { offset: to, size: len });
        }
        let new_array = allocator.array(heap)?;
        for i in from..=to {
            let element = self.index(heap, i)?;
            new_array.append(heap, allocator, element)?;
        }
        Ok(new_array)
    }

    pub fn concat(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
        other: &ArrayWrapper,
    ) -> HeapResult<ArrayWrapper> {
        let new_array = self.clone_array(heap, allocator)?;
        let other_len = other.length(heap)?;
        for i in 0..other_len {
            let element = other.index(heap, i as usize)?;
            new_array.append(heap, allocator, element)?;
        }
        Ok(new_array)
    }

    pub fn push(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
        element: Mono,
    ) -> HeapResult<ArrayWrapper> {
        let new_array = self.clone_array(heap, allocator)?;
        new_array.append(heap, allocator, element)?;
        Ok(new_array)
    }

    pub fn pop(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
    ) -> HeapResult<(ArrayWrapper, Mono)> {
        let len = self.length(heap)?;
        if len == 0 {
            return Err(HeapError::OutOfRange { offset: 0, size: 0 });
        }
        let removed = self.index(heap, (len - 1) as usize)?;
        let new_array = if len == 1 {
            allocator.array(heap)?
        } else {
            self.slice(heap, allocator, 0, (len - 2) as usize)?
        };
        Ok((new_array, removed))
    }

    pub fn shift(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
    ) -> HeapResult<(ArrayWrapper, Mono)> {
        let len = self.length(heap)?;
        if len == 0 {
            return Err(HeapError::OutOfRange { offset: 0, size: 0 });
        }
        let removed = self.index(heap, 0)?;
        let new_array = if len == 1 {
            allocator.array(heap)?
        } else {
            self.slice(heap, allocator, 1, (len - 1) as usize)?
        };
        Ok((new_array, removed))
    }

    pub fn remove(
        &self,
        heap: &mut Heap,
        allocator: &mut Allocator,
        i: usize,
    ) -> HeapResult<(ArrayWrapper, Mono)> {
        let len = self.length(heap)? as usize;
        if i >= len {
            return Err(HeapError::OutOfRange { offset: i, size: len });
        }
        let removed = self.index(heap, i)?;

        let new_array = if len == 1 {
            allocator.array(heap)?
        } else if i == 0 {
            self.slice(heap, allocator, 1, len - 1)?
        } else if i == len - 1 {
            self.slice(heap, allocator, 0, len - 2)?
        } else {
            let left = self.slice(heap, allocator, 0, i - 1)?;
            let right = self.slice(heap, allocator, i + 1, len - 1)?;
            left.concat(heap, allocator, &right)?
        };

        Ok((new_array, removed))
    }
}
