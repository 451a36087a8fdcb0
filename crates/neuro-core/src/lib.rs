//! Core traits and types for cycle-accurate accelerator modelling.
//!
//! Everything advances on a shared discrete tick. All component timing
//! derives from this. No exceptions.

mod axil;
mod observable;
mod tickable;
mod ticks;

pub use axil::{
    ReadAddrChannel, ReadDataChannel, RespCode, WriteAddrChannel, WriteDataChannel,
    WriteRespChannel, STRB_ALL, STRB_WIDTH, WORD_BYTES,
};
pub use observable::{Observable, Value};
pub use tickable::Tickable;
pub use ticks::Ticks;
