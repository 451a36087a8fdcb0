//! Observability trait for inspecting component state.
//!
//! Every component exposes its internal state for debugging and waveform-
//! style inspection. Queries never affect model state.

use std::fmt;

/// A dynamically-typed value for state queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Single-bit signal or flag.
    Bool(bool),
    /// 8-bit register (pixel cell, strobe).
    U8(u8),
    /// 32-bit register (data word, address).
    U32(u32),
    /// Tick counter or other wide count.
    U64(u64),
    /// Named state of a sub-state-machine.
    State(&'static str),
    /// Array of values (e.g. an image row).
    Array(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v:#04X}"),
            Value::U32(v) => write!(f, "{v:#010X}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::State(v) => write!(f, "{v}"),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

/// A component whose state can be inspected.
///
/// At any tick, you can query any component. Queries never affect model
/// state.
pub trait Observable {
    /// Query a specific property by path.
    ///
    /// Paths are hierarchical, separated by dots:
    /// - `flag` - Transfer-complete flag register
    /// - `read.state` - Read-engine state name
    /// - `image.0` - Pixel cell 0
    ///
    /// Returns `None` if the path is not recognised.
    fn query(&self, path: &str) -> Option<Value>;

    /// List all available query paths.
    ///
    /// Returns paths that can be passed to `query()`. Indexed paths are
    /// listed with a `*` placeholder (e.g. `image.*`).
    fn query_paths(&self) -> &'static [&'static str];
}
