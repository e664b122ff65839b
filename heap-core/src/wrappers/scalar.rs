// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::address::HeapAddress;
use crate::error::HeapResult;
use crate::heap::Heap;
use crate::mono::Mono;

/// Typed view over an INT32 mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int32Wrapper {
    mono: Mono,
}

impl Int32Wrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn read(&self, heap: &Heap) -> HeapResult<i32> {
        heap.region(self.mono.region_index)?
            .read_i32(self.mono.value_from_offset())
    }

    pub fn write(&self, heap: &mut Heap, value: i32) -> HeapResult<()> {
        heap.region_mut(self.mono.region_index)?
            .write_i32(self.mono.value_from_offset(), value)
    }
}

/// Typed view over a FLOAT64 mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Float64Wrapper {
    mono: Mono,
}

impl Float64Wrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn read(&self, heap: &Heap) -> HeapResult<f64> {
        heap.region(self.mono.region_index)?
            .read_f64(self.mono.value_from_offset())
    }

    pub fn write(&self, heap: &mut Heap, value: f64) -> HeapResult<()> {
        heap.region_mut(self.mono.region_index)?
            .write_f64(self.mono.value_from_offset(), value)
    }
}
