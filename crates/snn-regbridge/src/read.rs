//! Read engine.
//!
//! Serialises host read requests against the classifier's live output.
//! One read register exists, so the request address is accepted without
//! decoding. The sampled value is forced to zero while the transfer-
//! complete flag is set: a consumer can never observe an inference result
//! for an image that has not been fully handed off.

use neuro_core::{ReadAddrChannel, ReadDataChannel};

/// Read-engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Ready for a request (`arready` high).
    Idle,
    /// Data asserted, waiting for `rready`.
    ResponsePending,
}

/// Read serialisation state machine plus the inferred-result register.
pub struct ReadEngine {
    state: ReadState,
    /// Inferred-result register (`rdata`).
    rdata: u32,
}

impl ReadEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ReadState::Idle,
            rdata: 0,
        }
    }

    pub fn reset(&mut self) {
        self.state = ReadState::Idle;
        self.rdata = 0;
    }

    #[must_use]
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// `rvalid`: a read response is asserted.
    #[must_use]
    pub fn rvalid(&self) -> bool {
        self.state == ReadState::ResponsePending
    }

    /// `arready`: the logical negation of the pending state.
    #[must_use]
    pub fn arready(&self) -> bool {
        self.state == ReadState::Idle
    }

    /// Current inferred-result register value.
    #[must_use]
    pub fn rdata(&self) -> u32 {
        self.rdata
    }

    /// Advance one tick.
    ///
    /// The result register samples `class_id` whenever no read is pending
    /// or the requester accepts the current value. `blocked` (the pre-tick
    /// transfer-complete level) forces the register to zero regardless of
    /// pending state — even a held, unconsumed response goes to zero.
    pub fn step(
        &mut self,
        ar: &ReadAddrChannel,
        r: &ReadDataChannel,
        blocked: bool,
        class_id: u32,
    ) {
        if blocked {
            self.rdata = 0;
        } else if self.state == ReadState::Idle || r.ready {
            self.rdata = class_id;
        }
        self.state = match self.state {
            ReadState::Idle if ar.valid => ReadState::ResponsePending,
            ReadState::ResponsePending if r.ready => ReadState::Idle,
            s => s,
        };
    }
}

impl Default for ReadEngine {
    fn default() -> Self {
        Self::new()
    }
}
