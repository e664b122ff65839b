// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::error::{HeapError, HeapResult};
use crate::gc;
use crate::heap::Heap;
use crate::mono::MonoKind;
use crate::wrappers::array::ArrayWrapper;
use crate::wrappers::chunk::ChunkWrapper;
use crate::wrappers::scalar::{Float64Wrapper, Int32Wrapper};

/// Bump allocator over a heap's regions. Holds no reference to the heap
/// itself — every method takes one explicitly, per the "pass it explicitly"
/// rule in the design notes — only the ordered list of regions it currently
/// considers writable (the nursery working set; the *current* region is
/// always last).
pub struct Allocator {
    regions: Vec<usize>,
}

impl Allocator {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Region indices this allocator currently considers part of its
    /// nursery working set, oldest first.
    pub fn regions(&self) -> &[usize] {
        &self.regions
    }

    /// Used exclusively by the collector to install the post-GC working
    /// set (surviving unpaired regions plus freshly compacted ones).
    pub fn replace_regions(&mut self, regions: Vec<usize>) {
        self.regions = regions;
    }

    fn ensure_capacity(&mut self, heap: &mut Heap, kind: MonoKind) -> HeapResult<usize> {
        let size = kind.size();

        if let Some(&idx) = self.regions.last() {
            if heap.region(idx)?.remaining() >= size {
                return Ok(idx);
            }
        }

        match heap.new_region() {
            Ok(idx) => {
                self.regions.push(idx);
                Ok(idx)
            }
            Err(HeapError::HeapFull { .. }) => {
                gc::minor_collect(heap, self).map_err(|_| HeapError::Oom { kind })?;

                if let Some(&idx) = self.regions.last() {
                    if heap.region(idx)?.remaining() >= size {
                        return Ok(idx);
                    }
                }

                let idx = heap.new_region().map_err(|_| HeapError::Oom { kind })?;
                self.regions.push(idx);
                Ok(idx)
            }
            Err(e) => Err(e),
        }
    }

    /// Reserve a mono of `kind` in the current (or a freshly rolled) region,
    /// invoking GC if the heap itself is exhausted.
    pub fn allocate(&mut self, heap: &mut Heap, kind: MonoKind) -> HeapResult<crate::mono::Mono> {
        let idx = self.ensure_capacity(heap, kind)?;
        heap.region_mut(idx)?.create_mono(kind)
    }

    pub fn int32(&mut self, heap: &mut Heap, value: Option<i32>) -> HeapResult<Int32Wrapper> {
        let mono = self.allocate(heap, MonoKind::Int32)?;
        let wrapper = Int32Wrapper::new(mono);
        if let Some(v) = value {
            wrapper.write(heap, v)?;
        }
        Ok(wrapper)
    }

    pub fn float64(&mut self, heap: &mut Heap, value: Option<f64>) -> HeapResult<Float64Wrapper> {
        let mono = self.allocate(heap, MonoKind::Float64)?;
        let wrapper = Float64Wrapper::new(mono);
        if let Some(v) = value {
            wrapper.write(heap, v)?;
        }
        Ok(wrapper)
    }

    pub fn chunk(&mut self, heap: &mut Heap) -> HeapResult<ChunkWrapper> {
        let mono = self.allocate(heap, MonoKind::ChunkS8)?;
        // Fresh region bytes are zero, so length/slots/next are already
        // correct; the header byte written by `create_mono` is all this
        // kind needs.
        Ok(ChunkWrapper::new(mono))
    }

    pub fn array(&mut self, heap: &mut Heap) -> HeapResult<ArrayWrapper> {
        let mono = self.allocate(heap, MonoKind::ArrayS8)?;
        let wrapper = ArrayWrapper::new(mono);
        wrapper.init_embedded_chunk_header(heap)?;
        Ok(wrapper)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}
