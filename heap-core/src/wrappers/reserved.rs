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
use crate::heap::Heap;
use crate::mono::Mono;

/// Placeholder view over an ADDRESS mono. The layout (a single stored
/// pointer, 5 bytes total) is fixed so other monos can embed one, but no
/// operation over it is implemented yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWrapper {
    mono: Mono,
}

impl AddressWrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn read(&self, _heap: &Heap) -> HeapResult<HeapAddress> {
        Err(HeapError::Unimplemented { what: "AddressWrapper::read" })
    }
}

/// Placeholder view over a STRING_S8 mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringWrapper {
    mono: Mono,
}

impl StringWrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn read(&self, _heap: &Heap) -> HeapResult<String> {
        Err(HeapError::Unimplemented { what: "StringWrapper::read" })
    }
}

/// Placeholder view over an OBJECT_S8 mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectWrapper {
    mono: Mono,
}

impl ObjectWrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn get(&self, _heap: &Heap, _name: &str) -> HeapResult<Mono> {
        Err(HeapError::Unimplemented { what: "ObjectWrapper::get" })
    }
}

/// Placeholder view over a NAMED_PROPERTY_S8 mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPropertyWrapper {
    mono: Mono,
}

impl NamedPropertyWrapper {
    pub fn new(mono: Mono) -> Self {
        Self { mono }
    }

    pub fn mono(&self) -> Mono {
        self.mono
    }

    pub fn address(&self) -> HeapAddress {
        self.mono.header()
    }

    pub fn name(&self, _heap: &Heap) -> HeapResult<String> {
        Err(HeapError::Unimplemented { what: "NamedPropertyWrapper::name" })
    }
}
