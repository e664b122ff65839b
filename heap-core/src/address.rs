// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::config::REGION_SIZE;
use crate::error::{HeapError, HeapResult};

/// An absolute location of a byte within the heap: `region_index *
/// REGION_SIZE + region_offset`.
///
/// Logically 64 bits wide. Stored inside monos as a 32-bit value (see the
/// address-width open question in the design notes); [`HeapAddress::to_stored`]
/// is where that narrowing is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeapAddress(u64);

impl HeapAddress {
    pub const NULL: HeapAddress = HeapAddress(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn from_parts(region_index: usize, region_offset: usize) -> Self {
        Self(region_index as u64 * REGION_SIZE as u64 + region_offset as u64)
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn region_index(self) -> usize {
        (self.0 / REGION_SIZE as u64) as usize
    }

    pub fn region_offset(self) -> usize {
        (self.0 % REGION_SIZE as u64) as usize
    }

    /// Split into the region base address and the offset within it. Used by
    /// the collector's pointer-rewrite pass, which keys its rebase table by
    /// region base.
    pub fn split(self) -> (HeapAddress, usize) {
        let base = HeapAddress::from_parts(self.region_index(), 0);
        (base, self.region_offset())
    }

    /// Narrow to the 32-bit width monos actually store pointers in.
    pub fn to_stored(self) -> HeapResult<u32> {
        u32::try_from(self.0).map_err(|_| HeapError::OutOfRange {
            offset: self.0 as usize,
            size: u32::MAX as usize,
        })
    }

    pub fn from_stored(raw: u32) -> Self {
        Self(raw as u64)
    }

    pub fn offset_by(self, delta: usize) -> Self {
        Self(self.0 + delta as u64)
    }
}

impl std::fmt::Display for HeapAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
