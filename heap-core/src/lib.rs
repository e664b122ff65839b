// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

//! A region-based, bump-allocated heap with a pairing minor collector, for
//! a small dynamic guest language's scalars, arrays, and (stubbed) objects.
//!
//! Nothing in this crate holds a reference to anything else in it — the
//! heap, the allocator, and every typed wrapper are plain value types, and
//! every operation takes the components it needs as explicit parameters.
//! See [`heap::Heap`] for why.

pub mod address;
pub mod allocator;
pub mod config;
pub mod error;
pub mod gc;
pub mod heap;
pub mod mono;
pub mod region;
pub mod wrappers;

pub use address::HeapAddress;
pub use allocator::Allocator;
pub use error::{HeapError, HeapResult};
pub use heap::Heap;
pub use mono::{Mono, MonoKind};
pub use wrappers::array::ArrayWrapper;
pub use wrappers::chunk::ChunkWrapper;
pub use wrappers::reserved::{AddressWrapper, NamedPropertyWrapper, ObjectWrapper, StringWrapper};
pub use wrappers::scalar::{Float64Wrapper, Int32Wrapper};
pub use wrappers::WrappedMono;
