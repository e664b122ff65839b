// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::address::HeapAddress;
use crate::error::{HeapError, HeapResult};

/// The kind tag stored in a mono's header byte. Values match the on-heap
/// encoding exactly (§3 of the design doc) — do not renumber these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MonoKind {
    Int32 = 1,
    Float64 = 2,
    ArrayS8 = 3,
    StringS8 = 4,
    ObjectS8 = 5,
    NamedPropertyS8 = 6,
    Address = 11,
    ChunkS8 = 31,
}

impl MonoKind {
    pub fn from_byte(byte: u8) -> HeapResult<Self> {
        match byte {
            1 => Ok(MonoKind::Int32),
            2 => Ok(MonoKind::Float64),
            3 => Ok(MonoKind::ArrayS8),
            4 => Ok(MonoKind::StringS8),
            5 => Ok(MonoKind::ObjectS8),
            6 => Ok(MonoKind::NamedPropertyS8),
            11 => Ok(MonoKind::Address),
            31 => Ok(MonoKind::ChunkS8),
            _ => Err(HeapError::WrongKind { byte }),
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Total mono size in bytes, header included.
    pub fn size(self) -> usize {
        match self {
            MonoKind::Int32 => 5,
            MonoKind::Address => 5,
            MonoKind::Float64 => 9,
            MonoKind::ArrayS8 => 43,
            MonoKind::ChunkS8 => 38,
            MonoKind::StringS8 => 69,
            MonoKind::ObjectS8 => 73,
            MonoKind::NamedPropertyS8 => 73,
        }
    }

    /// Whether this kind stores heap addresses that the collector must
    /// rewrite after relocation.
    pub fn has_pointers(self) -> bool {
        matches!(
            self,
            MonoKind::Address | MonoKind::ArrayS8 | MonoKind::ChunkS8
        )
    }
}

/// A view over a single record inside a region: just enough to locate and
/// reinterpret its bytes. Mono values are `Copy` — they carry no borrow of
/// the region they describe, so callers pass the owning `Heap`/`Region`
/// alongside whenever they need to read or write through one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mono {
    pub region_index: usize,
    pub kind: MonoKind,
    header: HeapAddress,
}

impl Mono {
    pub fn new(region_index: usize, kind: MonoKind, header: HeapAddress) -> Self {
        debug_assert_eq!(header.region_index(), region_index);
        Self {
            region_index,
            kind,
            header,
        }
    }

    pub fn header(&self) -> HeapAddress {
        self.header
    }

    /// Address of the first payload byte, `header + 1`.
    pub fn value_from(&self) -> HeapAddress {
        self.header.offset_by(1)
    }

    pub fn header_offset(&self) -> usize {
        self.header.region_offset()
    }

    pub fn value_from_offset(&self) -> usize {
        self.header_offset() + 1
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    /// The region-local offset one past the last byte of this mono.
    pub fn end_offset(&self) -> usize {
        self.header_offset() + self.size()
    }
}
