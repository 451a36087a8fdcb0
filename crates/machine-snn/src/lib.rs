//! System model: host bus master, register bridge and classifier wired
//! onto one clock.
//!
//! The host issues transaction-level operations (write a cell, write the
//! flag, read the result) and the system turns them into correct
//! valid/ready signalling against the bridge, tick by tick. The
//! classifier consumes the bridge's accelerator-facing outputs and feeds
//! its class id back into the read path.

mod capture;
mod host;
mod system;

pub use capture::{CaptureError, TraceFrame, TraceRecorder};
pub use host::{BridgeView, HostMaster, HostSignals};
pub use system::SnnSystem;
