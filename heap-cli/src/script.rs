// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

use anyhow::{anyhow, bail, Context, Result};
use heap_core::{Allocator, Heap, Mono, WrappedMono};

/// One line of a trace script, after parsing. See the module-level docs on
/// [`run`] for the grammar.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Int32(i32),
    Float64(f64),
    Array,
    Append { array: usize, source: usize },
    Index { array: usize, i: usize },
    Slice { array: usize, from: usize, to: usize },
    Concat { a: usize, b: usize },
    Gc,
}

fn parse_line(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let op = words.next().ok_or_else(|| anyhow!("empty line"))?;

    fn arg<'a>(op: &str, words: &mut std::str::SplitWhitespace<'a>, name: &str) -> Result<&'a str> {
        words
            .next()
            .ok_or_else(|| anyhow!("`{op}` is missing its {name} argument"))
    }

    match op {
        "int32" => {
            let value: i32 = arg(op, &mut words, "value")?.parse().context("int32 value")?;
            Ok(Command::Int32(value))
        }
        "float64" => {
            let value: f64 = arg(op, &mut words, "value")?.parse().context("float64 value")?;
            Ok(Command::Float64(value))
        }
        "array" => Ok(Command::Array),
        "append" => {
            let array = arg(op, &mut words, "array-slot")?.parse().context("array-slot")?;
            let source = arg(op, &mut words, "source-slot")?.parse().context("source-slot")?;
            Ok(Command::Append { array, source })
        }
        "index" => {
            let array = arg(op, &mut words, "array-slot")?.parse().context("array-slot")?;
            let i = arg(op, &mut words, "i")?.parse().context("i")?;
            Ok(Command::Index { array, i })
        }
        "slice" => {
            let array = arg(op, &mut words, "array-slot")?.parse().context("array-slot")?;
            let from = arg(op, &mut words, "from")?.parse().context("from")?;
            let to = arg(op, &mut words, "to")?.parse().context("to")?;
            Ok(Command::Slice { array, from, to })
        }
        "concat" => {
            let a = arg(op, &mut words, "a-slot")?.parse().context("a-slot")?;
            let b = arg(op, &mut words, "b-slot")?.parse().context("b-slot")?;
            Ok(Command::Concat { a, b })
        }
        "gc" => Ok(Command::Gc),
        other => bail!("unknown operation `{other}`"),
    }
}

fn slot(slots: &[Mono], index: usize) -> Result<Mono> {
    slots
        .get(index)
        .copied()
        .ok_or_else(|| anyhow!("slot {index} has not been produced yet"))
}

fn as_array(mono: Mono) -> Result<heap_core::ArrayWrapper> {
    match mono.dispatch() {
        WrappedMono::Array(w) => Ok(w),
        other => bail!("slot holds a {:?}, not an array", other.mono().kind),
    }
}

/// Run every command in `source` against `heap`/`allocator` in order,
/// tracing one line per executed operation. Values produced by `int32`,
/// `float64`, `array`, `index`, `slice`, and `concat` are appended to a
/// slot list in the order they were produced; later lines name earlier
/// results by that slot index. `append` mutates its array slot in place
/// and produces no new slot.
pub fn run(heap: &mut Heap, allocator: &mut Allocator, source: &str) -> Result<()> {
    let mut slots: Vec<Mono> = Vec::new();

    for (lineno, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = parse_line(line).with_context(|| format!("line {}: `{line}`", lineno + 1))?;

        match command {
            Command::Int32(value) => {
                let w = allocator.int32(heap, Some(value))?;
                tracing::info!(slot = slots.len(), value, "int32");
                slots.push(w.mono());
            }
            Command::Float64(value) => {
                let w = allocator.float64(heap, Some(value))?;
                tracing::info!(slot = slots.len(), value, "float64");
                slots.push(w.mono());
            }
            Command::Array => {
                let w = allocator.array(heap)?;
                tracing::info!(slot = slots.len(), "array");
                slots.push(w.mono());
            }
            Command::Append { array, source } => {
                let array = as_array(slot(&slots, array)?)?;
                let source = slot(&slots, source)?;
                array.append(heap, allocator, source)?;
                tracing::info!(len = array.length(heap)?, "append");
            }
            Command::Index { array, i } => {
                let array = as_array(slot(&slots, array)?)?;
                let element = array.index(heap, i)?;
                tracing::info!(slot = slots.len(), i, "index");
                slots.push(element);
            }
            Command::Slice { array, from, to } => {
                let array = as_array(slot(&slots, array)?)?;
                let sliced = array.slice(heap, allocator, from, to)?;
                tracing::info!(slot = slots.len(), from, to, "slice");
                slots.push(sliced.mono());
            }
            Command::Concat { a, b } => {
                let a = as_array(slot(&slots, a)?)?;
                let b = as_array(slot(&slots, b)?)?;
                let joined = a.concat(heap, allocator, &b)?;
                tracing::info!(slot = slots.len(), "concat");
                slots.push(joined.mono());
            }
            Command::Gc => {
                heap_core::gc::minor_collect(heap, allocator)?;
                tracing::info!(regions = allocator.regions().len(), "gc");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_small_script() {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let source = "\
            array\n\
            int32 7\n\
            append 0 1\n\
            index 0 0\n\
        ";
        run(&mut heap, &mut allocator, source).unwrap();
    }

    #[test]
    fn rejects_unknown_operation() {
        assert!(parse_line("frobnicate 1").is_err());
    }

    #[test]
    fn rejects_reference_to_unproduced_slot() {
        let mut heap = Heap::new();
        let mut allocator = Allocator::new();
        let err = run(&mut heap, &mut allocator, "index 0 0").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
