// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

//! Compile-time constants for the heap layout.
//!
//! Nothing here is configurable at runtime: region and mono sizes are part
//! of the on-heap binary format (see the mono size table in `mono.rs`), so
//! changing them changes what bytes mean.

/// Size in bytes of a single region, including its 5-byte header.
pub const REGION_SIZE: usize = 1_024_000;

/// Number of regions the heap pre-allocates.
pub const NUMBER_REGIONS: usize = 256;

/// Byte offset of the bump counter (u32 LE) within a region.
pub const REGION_COUNTER_OFFSET: usize = 0;

/// Byte offset of the region-kind tag within a region.
pub const REGION_KIND_OFFSET: usize = 4;

/// First byte offset available for monos; bytes before this are the header.
pub const REGION_HEADER_SIZE: usize = 5;

/// Maximum number of slot pointers a single chunk holds before it must
/// link to a new chunk.
pub const CHUNK_CAPACITY: usize = 8;

/// Width, in bytes, of a pointer as stored inside a mono (see the address
/// width open question in the design notes).
pub const STORED_ADDRESS_WIDTH: usize = 4;

/// Total addressable heap size, `NUMBER_REGIONS * REGION_SIZE`.
pub const HEAP_SIZE: u64 = (NUMBER_REGIONS as u64) * (REGION_SIZE as u64);
