// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use thiserror::Error;

use crate::mono::MonoKind;

/// The full error taxonomy for the heap, allocator, and collector.
///
/// Each variant is a distinct, matchable failure kind; nothing here is
/// collapsed into a string so callers can recover from the ones that are
/// locally recoverable (`RegionFull`, `ChunkFull`) and propagate the rest.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HeapError {
    #[error("offset {offset} out of range for a region/mono of size {size}")]
    OutOfRange { offset: usize, size: usize },

    #[error("region cannot fit {size} more bytes (counter at {counter})")]
    RegionFull { counter: u32, size: usize },

    #[error("chunk at {address} already holds {capacity} entries")]
    ChunkFull { address: u64, capacity: usize },

    #[error("heap exhausted: all {capacity} regions are in use")]
    HeapFull { capacity: usize },

    #[error("unknown mono kind byte {byte} encountered")]
    WrongKind { byte: u8 },

    #[error("address {address} underflows region base {region_base}")]
    Underflow { address: u64, region_base: u64 },

    #[error("region index {index} is out of range (have {capacity} regions)")]
    OutOfRegionRange { index: usize, capacity: usize },

    #[error("out of memory: allocator could not place a {kind:?} mono even after GC")]
    Oom { kind: MonoKind },

    #[error("{what} is not implemented")]
    Unimplemented { what: &'static str },
}

pub type HeapResult<T> = Result<T, HeapError>;
