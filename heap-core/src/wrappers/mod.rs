// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

pub mod array;
pub mod chunk;
pub mod reserved;
pub mod scalar;

use crate::mono::{Mono, MonoKind};

use array::ArrayWrapper;
use chunk::ChunkWrapper;
use reserved::{AddressWrapper, NamedPropertyWrapper, ObjectWrapper, StringWrapper};
use scalar::{Float64Wrapper, Int32Wrapper};

/// A `Mono` resolved into its typed view, for callers that want to dispatch
/// on kind once instead of matching `MonoKind` themselves at every call
/// site. Produced by [`Mono::dispatch`].
#[derive(Debug, Clone, Copy)]
pub enum WrappedMono {
    Int32(Int32Wrapper),
    Float64(Float64Wrapper),
    Array(ArrayWrapper),
    String(StringWrapper),
    Object(ObjectWrapper),
    NamedProperty(NamedPropertyWrapper),
    Address(AddressWrapper),
    Chunk(ChunkWrapper),
}

impl Mono {
    /// Resolve this mono into the typed wrapper matching its kind. Infallible:
    /// a `Mono` always carries a kind that was already validated when it was
    /// read off the heap (see [`Heap::fetch_mono`]).
    pub fn dispatch(self) -> WrappedMono {
        match self.kind {
            MonoKind::Int32 => WrappedMono::Int32(Int32Wrapper::new(self)),
            MonoKind::Float64 => WrappedMono::Float64(Float64Wrapper::new(self)),
            MonoKind::ArrayS8 => WrappedMono::Array(ArrayWrapper::new(self)),
            MonoKind::StringS8 => WrappedMono::String(StringWrapper::new(self)),
            MonoKind::ObjectS8 => WrappedMono::Object(ObjectWrapper::new(self)),
            MonoKind::NamedPropertyS8 => WrappedMono::NamedProperty(NamedPropertyWrapper::new(self)),
            MonoKind::Address => WrappedMono::Address(AddressWrapper::new(self)),
            MonoKind::ChunkS8 => WrappedMono::Chunk(ChunkWrapper::new(self)),
        }
    }
}

impl WrappedMono {
    /// The kind this view was built from, independent of which variant it
    /// matched into.
    pub fn mono(&self) -> Mono {
        match self {
            WrappedMono::Int32(w) => w.mono(),
            WrappedMono::Float64(w) => w.mono(),
            WrappedMono::Array(w) => w.mono(),
            WrappedMono::String(w) => w.mono(),
            WrappedMono::Object(w) => w.mono(),
            WrappedMono::NamedProperty(w) => w.mono(),
            WrappedMono::Address(w) => w.mono(),
            WrappedMono::Chunk(w) => w.mono(),
        }
    }
}
