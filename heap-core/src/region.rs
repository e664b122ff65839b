// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use crate::address::HeapAddress;
use crate::config::{REGION_HEADER_SIZE, REGION_KIND_OFFSET, REGION_SIZE};
use crate::error::{HeapError, HeapResult};
use crate::mono::{Mono, MonoKind};

/// The lifecycle tag stored at region byte [4]. Only `Eden` is ever
/// produced by this implementation; promotion to the other kinds is a
/// stubbed-out extension point (see the design notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RegionKind {
    Eden = 11,
    Survivor = 12,
    Tenured = 13,
    Humongous = 14,
}

impl RegionKind {
    fn from_byte(byte: u8) -> HeapResult<Self> {
        match byte {
            11 => Ok(RegionKind::Eden),
            12 => Ok(RegionKind::Survivor),
            13 => Ok(RegionKind::Tenured),
            14 => Ok(RegionKind::Humongous),
            _ => Err(HeapError::WrongKind { byte }),
        }
    }
}

/// One fixed-size, contiguous byte buffer: the unit the collector operates
/// on. A region owns its bytes outright; nothing else may alias them.
#[derive(Debug)]
pub struct Region {
    bytes: Box<[u8]>,
    index: usize,
    base: HeapAddress,
}

impl Region {
    /// Construct a fresh, all-zero region. Does not yet carry a valid
    /// counter — call [`Region::initialize`] before handing it to a caller.
    pub fn new(index: usize) -> Self {
        Self {
            bytes: vec![0u8; REGION_SIZE].into_boxed_slice(),
            index,
            base: HeapAddress::from_parts(index, 0),
        }
    }

    /// Set the bump counter to its starting value. The kind byte is left at
    /// 0 deliberately; [`Region::kind`] elevates it to `Eden` lazily on
    /// first read, matching the on-heap format where a never-initialized
    /// kind byte of 0 means "fresh eden region".
    pub fn initialize(&mut self) {
        self.set_counter(REGION_HEADER_SIZE as u32);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn base(&self) -> HeapAddress {
        self.base
    }

    pub fn counter(&self) -> u32 {
        u32::from_le_bytes(self.bytes[0..4].try_into().unwrap())
    }

    fn set_counter(&mut self, value: u32) {
        self.bytes[0..4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn kind(&mut self) -> HeapResult<RegionKind> {
        let byte = self.bytes[REGION_KIND_OFFSET];
        if byte == 0 {
            self.bytes[REGION_KIND_OFFSET] = RegionKind::Eden as u8;
            return Ok(RegionKind::Eden);
        }
        RegionKind::from_byte(byte)
    }

    pub fn remaining(&self) -> usize {
        REGION_SIZE - self.counter() as usize
    }

    fn check_range(&self, offset: usize, width: usize) -> HeapResult<()> {
        if offset + width > REGION_SIZE {
            return Err(HeapError::OutOfRange {
                offset,
                size: REGION_SIZE,
            });
        }
        Ok(())
    }

    /// Create a new mono of `kind` at the current bump offset, advancing
    /// the counter past it. Fails with `RegionFull` without mutating
    /// anything if there isn't room.
    pub fn create_mono(&mut self, kind: MonoKind) -> HeapResult<Mono> {
        let size = kind.size();
        let counter = self.counter();
        if counter as usize + size > REGION_SIZE {
            return Err(HeapError::RegionFull { counter, size });
        }

        let offset = counter as usize;
        self.bytes[offset] = kind.as_byte();
        self.set_counter(counter + size as u32);

        let header = HeapAddress::from_parts(self.index, offset);
        Ok(Mono::new(self.index, kind, header))
    }

    /// Visit every mono in `[5, counter)` in order, header-first.
    pub fn traverse<F: FnMut(Mono) -> HeapResult<()>>(&self, mut visit: F) -> HeapResult<()> {
        let counter = self.counter() as usize;
        let mut offset = REGION_HEADER_SIZE;
        while offset < counter {
            let byte = self.bytes[offset];
            if byte == 0 {
                break;
            }
            let kind = MonoKind::from_byte(byte)?;
            let header = HeapAddress::from_parts(self.index, offset);
            visit(Mono::new(self.index, kind, header))?;
            offset += kind.size();
        }
        Ok(())
    }

    /// Copy `[5, counter)` into `dest[dest_offset..]` without touching
    /// `dest`'s own header or counter. Used exclusively by the collector
    /// during pair compaction.
    pub fn content_clone_to(&self, dest: &mut Region, dest_offset: usize) -> HeapResult<usize> {
        let payload_len = self.counter() as usize - REGION_HEADER_SIZE;
        dest.check_range(dest_offset, payload_len)?;
        let src = &self.bytes[REGION_HEADER_SIZE..REGION_HEADER_SIZE + payload_len];
        dest.bytes[dest_offset..dest_offset + payload_len].copy_from_slice(src);
        Ok(payload_len)
    }

    pub fn set_counter_raw(&mut self, value: u32) {
        self.set_counter(value);
    }

    pub fn raw_byte(&self, offset: usize) -> HeapResult<u8> {
        self.check_range(offset, 1)?;
        Ok(self.bytes[offset])
    }

    pub fn raw_write_byte(&mut self, offset: usize, byte: u8) -> HeapResult<()> {
        self.check_range(offset, 1)?;
        self.bytes[offset] = byte;
        Ok(())
    }

    // --- byte codec -------------------------------------------------------

    pub fn read_u8(&self, offset: usize) -> HeapResult<u8> {
        self.check_range(offset, 1)?;
        Ok(self.bytes[offset])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> HeapResult<()> {
        self.check_range(offset, 1)?;
        self.bytes[offset] = value;
        Ok(())
    }

    pub fn new_u8(&mut self, value: u8) -> HeapResult<usize> {
        let offset = self.counter() as usize;
        self.write_u8(offset, value)?;
        self.set_counter(offset as u32 + 1);
        Ok(offset)
    }

    pub fn read_i8(&self, offset: usize) -> HeapResult<i8> {
        self.read_u8(offset).map(|b| b as i8)
    }

    pub fn write_i8(&mut self, offset: usize, value: i8) -> HeapResult<()> {
        self.write_u8(offset, value as u8)
    }

    pub fn new_i8(&mut self, value: i8) -> HeapResult<usize> {
        self.new_u8(value as u8)
    }

    pub fn read_u32(&self, offset: usize) -> HeapResult<u32> {
        self.check_range(offset, 4)?;
        Ok(u32::from_le_bytes(
            self.bytes[offset..offset + 4].try_into().unwrap(),
        ))
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> HeapResult<()> {
        self.check_range(offset, 4)?;
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn new_u32(&mut self, value: u32) -> HeapResult<usize> {
        let offset = self.counter() as usize;
        self.write_u32(offset, value)?;
        self.set_counter(offset as u32 + 4);
        Ok(offset)
    }

    pub fn read_i32(&self, offset: usize) -> HeapResult<i32> {
        self.read_u32(offset).map(|v| v as i32)
    }

    pub fn write_i32(&mut self, offset: usize, value: i32) -> HeapResult<()> {
        self.write_u32(offset, value as u32)
    }

    pub fn new_i32(&mut self, value: i32) -> HeapResult<usize> {
        self.new_u32(value as u32)
    }

    pub fn read_u64(&self, offset: usize) -> HeapResult<u64> {
        self.check_range(offset, 8)?;
        Ok(u64::from_le_bytes(
            self.bytes[offset..offset + 8].try_into().unwrap(),
        ))
    }

    pub fn write_u64(&mut self, offset: usize, value: u64) -> HeapResult<()> {
        self.check_range(offset, 8)?;
        self.bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn new_u64(&mut self, value: u64) -> HeapResult<usize> {
        let offset = self.counter() as usize;
        self.write_u64(offset, value)?;
        self.set_counter(offset as u32 + 8);
        Ok(offset)
    }

    pub fn read_f32(&self, offset: usize) -> HeapResult<f32> {
        self.read_u32(offset).map(f32::from_bits)
    }

    pub fn write_f32(&mut self, offset: usize, value: f32) -> HeapResult<()> {
        self.write_u32(offset, value.to_bits())
    }

    pub fn new_f32(&mut self, value: f32) -> HeapResult<usize> {
        self.new_u32(value.to_bits())
    }

    pub fn read_f64(&self, offset: usize) -> HeapResult<f64> {
        self.read_u64(offset).map(f64::from_bits)
    }

    pub fn write_f64(&mut self, offset: usize, value: f64) -> HeapResult<()> {
        self.write_u64(offset, value.to_bits())
    }

    pub fn new_f64(&mut self, value: f64) -> HeapResult<usize> {
        self.new_u64(value.to_bits())
    }

    /// Pointer width is 32 bits by convention (see the address-width open
    /// question); `read_address`/`write_address` are the aliases the rest
    /// of the crate should use instead of reaching for `read_u32` directly.
    pub fn read_address(&self, offset: usize) -> HeapResult<HeapAddress> {
        self.read_u32(offset).map(HeapAddress::from_stored)
    }

    pub fn write_address(&mut self, offset: usize, addr: HeapAddress) -> HeapResult<()> {
        self.write_u32(offset, addr.to_stored()?)
    }

    pub fn read_byte(&self, offset: usize) -> HeapResult<u8> {
        self.read_u8(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_header_size() {
        let mut r = Region::new(0);
        r.initialize();
        assert_eq!(r.counter(), REGION_HEADER_SIZE as u32);
    }

    #[test]
    fn fresh_kind_elevates_to_eden_and_persists() {
        let mut r = Region::new(0);
        r.initialize();
        assert_eq!(r.kind().unwrap(), RegionKind::Eden);
        assert_eq!(r.bytes[REGION_KIND_OFFSET], RegionKind::Eden as u8);
    }

    #[test]
    fn create_mono_advances_counter_by_size() {
        let mut r = Region::new(0);
        r.initialize();
        let before = r.counter();
        let mono = r.create_mono(MonoKind::Int32).unwrap();
        assert_eq!(r.counter(), before + 5);
        assert_eq!(mono.header_offset(), before as usize);
    }

    #[test]
    fn region_full_when_mono_would_not_fit() {
        let mut r = Region::new(0);
        r.initialize();
        r.set_counter_raw((REGION_SIZE - 2) as u32);
        let err = r.create_mono(MonoKind::Float64).unwrap_err();
        assert!(matches!(err, HeapError::RegionFull { .. }));
    }

    #[test]
    fn scalar_round_trip() {
        let mut r = Region::new(0);
        r.initialize();
        let off = r.new_i32(-1025).unwrap();
        assert_eq!(r.read_i32(off).unwrap(), -1025);
        let off = r.new_f64(3.25).unwrap();
        assert_eq!(r.read_f64(off).unwrap(), 3.25);
    }

    #[test]
    fn out_of_range_read_fails() {
        let r = Region::new(0);
        let err = r.read_u32(REGION_SIZE - 1).unwrap_err();
        assert!(matches!(err, HeapError::OutOfRange { .. }));
    }
}
