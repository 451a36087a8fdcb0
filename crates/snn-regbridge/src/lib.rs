//! Memory-mapped register bridge for the spiking-neuron classifier.
//!
//! The bridge sits between a host bus master and the fixed-function
//! classifier. The host writes a 256-cell pixel image byte by byte over an
//! AXI-Lite-style request/response protocol; the bridge exposes the
//! assembled image plus a "new image" level to the classifier, and routes
//! the classifier's inferred class id back through a single read register.
//!
//! Four sub-state-machines share one clock: the write arbiter, the
//! register store, the write responder and the read engine. Each `tick()`
//! computes every next-state value from pre-tick state plus current
//! inputs, then commits them together — no sub-machine observes another's
//! same-tick update.
//!
//! # Register map (byte-addressed)
//!
//! | Addr      | Register               | Access                        |
//! |-----------|------------------------|-------------------------------|
//! | 0–255     | image cell[i] (8-bit)  | host write, classifier read   |
//! | 256+      | transfer-complete flag | host write (aliased decode)   |
//! | 0 (read)  | inferred result        | host read                     |
//!
//! Writes anywhere at or above address 256 land on the flag register; the
//! decode is the single threshold `addr < 256` and out-of-range addresses
//! alias rather than fault. Every write response is OKAY.

mod arbiter;
mod read;
mod response;
mod store;

pub use arbiter::WriteArbiter;
pub use read::{ReadEngine, ReadState};
pub use response::{RespState, WriteResponder};
pub use store::{apply_masked_write, RegisterStore, FLAG_ADDR, IMAGE_CELLS};

use neuro_core::{
    Observable, ReadAddrChannel, ReadDataChannel, RespCode, Value, WriteAddrChannel,
    WriteDataChannel, WriteRespChannel,
};

/// Per-tick input signals to the bridge.
///
/// `reset` is synchronous and level-held: while true it overrides every
/// transition rule and forces the zero/idle values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeInputs {
    pub reset: bool,
    pub aw: WriteAddrChannel,
    pub w: WriteDataChannel,
    pub b: WriteRespChannel,
    pub ar: ReadAddrChannel,
    pub r: ReadDataChannel,
    /// Classifier's live output, sampled combinationally by the read
    /// engine.
    pub class_id: u32,
}

/// The register bridge chip.
pub struct RegBridge {
    arbiter: WriteArbiter,
    store: RegisterStore,
    responder: WriteResponder,
    read: ReadEngine,
}

impl RegBridge {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arbiter: WriteArbiter::new(),
            store: RegisterStore::new(),
            responder: WriteResponder::new(),
            read: ReadEngine::new(),
        }
    }

    /// Advance the bridge by one clock tick.
    pub fn tick(&mut self, inputs: &BridgeInputs) {
        if inputs.reset {
            self.arbiter.reset();
            self.store.reset();
            self.responder.reset();
            self.read.reset();
            return;
        }

        // Snapshot pre-tick state shared across sub-machines
        let admitted = self.arbiter.admitted();
        let (addr, data, strb) = self.arbiter.latched();
        let resp_busy = self.responder.valid();
        let blocked = self.store.image_complete();

        // One admitted write mutates exactly one register this tick
        if admitted {
            self.store.commit_write(addr, data, strb);
        }
        self.responder.step(admitted, inputs.b.ready);
        self.read.step(&inputs.ar, &inputs.r, blocked, inputs.class_id);
        self.arbiter.step(&inputs.aw, &inputs.w, resp_busy, inputs.b.ready);
    }

    /// `awready`: address phase acknowledged (one-tick admission pulse).
    #[must_use]
    pub fn awready(&self) -> bool {
        self.arbiter.admitted()
    }

    /// `wready`: data phase acknowledged. Always pulses together with
    /// `awready`; the arbiter never accepts the phases out of step.
    #[must_use]
    pub fn wready(&self) -> bool {
        self.arbiter.admitted()
    }

    /// `bvalid`: a write acknowledgement is outstanding.
    #[must_use]
    pub fn bvalid(&self) -> bool {
        self.responder.valid()
    }

    /// `bresp`: always OKAY.
    #[must_use]
    pub fn bresp(&self) -> RespCode {
        self.responder.resp()
    }

    /// `arready`: the read engine accepts a request.
    #[must_use]
    pub fn arready(&self) -> bool {
        self.read.arready()
    }

    /// `rvalid`: a read response is asserted.
    #[must_use]
    pub fn rvalid(&self) -> bool {
        self.read.rvalid()
    }

    /// `rdata`: the inferred-result register.
    #[must_use]
    pub fn rdata(&self) -> u32 {
        self.read.rdata()
    }

    /// Accelerator-facing parallel image bus.
    #[must_use]
    pub fn image(&self) -> &[u8; IMAGE_CELLS] {
        self.store.image()
    }

    /// Accelerator-facing "new image" level.
    #[must_use]
    pub fn new_image(&self) -> bool {
        self.store.image_complete()
    }

    /// Raw transfer-complete flag value.
    #[must_use]
    pub fn flag(&self) -> u32 {
        self.store.flag()
    }
}

impl Default for RegBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Observable for RegBridge {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(index) = path.strip_prefix("image.") {
            let i: usize = index.parse().ok()?;
            return self.store.image().get(i).map(|&c| Value::U8(c));
        }
        match path {
            "awready" => Some(Value::Bool(self.awready())),
            "bvalid" => Some(Value::Bool(self.bvalid())),
            "arready" => Some(Value::Bool(self.arready())),
            "rvalid" => Some(Value::Bool(self.rvalid())),
            "rdata" => Some(Value::U32(self.rdata())),
            "flag" => Some(Value::U32(self.flag())),
            "new_image" => Some(Value::Bool(self.new_image())),
            "resp.state" => Some(Value::State(match self.responder.state() {
                RespState::Idle => "Idle",
                RespState::Pending => "Pending",
            })),
            "read.state" => Some(Value::State(match self.read.state() {
                ReadState::Idle => "Idle",
                ReadState::ResponsePending => "ResponsePending",
            })),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "awready",
            "bvalid",
            "arready",
            "rvalid",
            "rdata",
            "flag",
            "new_image",
            "resp.state",
            "read.state",
            "image.*",
        ]
    }
}
