//! Write-address/data arbiter.
//!
//! Admits a write only when both the address phase and the data phase are
//! valid on the same tick, and no unconsumed response blocks the slot.
//! The admission flag is a one-tick pulse: it drives `awready`/`wready`
//! for exactly one cycle and gates itself off on the next.
//!
//! A lone address or lone data request stalls indefinitely. There is no
//! timeout or cancellation; the protocol has no escape from a half-paired
//! request.

use neuro_core::{WriteAddrChannel, WriteDataChannel};

/// Write admission state.
pub struct WriteArbiter {
    /// One-tick admission pulse (drives `awready` and `wready`).
    admitted: bool,
    /// Target address latched at admission.
    addr: u32,
    /// Data word latched at admission.
    data: u32,
    /// Byte strobe latched at admission.
    strb: u8,
}

impl WriteArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            admitted: false,
            addr: 0,
            data: 0,
            strb: 0,
        }
    }

    pub fn reset(&mut self) {
        self.admitted = false;
        self.addr = 0;
        self.data = 0;
        self.strb = 0;
    }

    /// True during the single tick following an admission.
    #[must_use]
    pub fn admitted(&self) -> bool {
        self.admitted
    }

    /// The (address, data, strobe) triple latched at admission.
    #[must_use]
    pub fn latched(&self) -> (u32, u32, u8) {
        (self.addr, self.data, self.strb)
    }

    /// Evaluate the admission rule for the next tick.
    ///
    /// Admits when no pulse is currently active, both phases are valid,
    /// and either no response is outstanding or the requester accepts it
    /// this tick. `resp_busy` and `bready` must be the pre-tick response
    /// state and the current requester-ready input.
    pub fn step(
        &mut self,
        aw: &WriteAddrChannel,
        w: &WriteDataChannel,
        resp_busy: bool,
        bready: bool,
    ) {
        let admit = !self.admitted && aw.valid && w.valid && (!resp_busy || bready);
        if admit {
            self.addr = aw.addr;
            self.data = w.data;
            self.strb = w.strb;
        }
        self.admitted = admit;
    }
}

impl Default for WriteArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aw(valid: bool, addr: u32) -> WriteAddrChannel {
        WriteAddrChannel { valid, addr }
    }

    fn w(valid: bool, data: u32) -> WriteDataChannel {
        WriteDataChannel {
            valid,
            data,
            strb: 0x0F,
        }
    }

    #[test]
    fn lone_address_phase_stalls() {
        let mut arb = WriteArbiter::new();
        for _ in 0..10 {
            arb.step(&aw(true, 5), &w(false, 0), false, false);
            assert!(!arb.admitted(), "address without data must not admit");
        }
    }

    #[test]
    fn lone_data_phase_stalls() {
        let mut arb = WriteArbiter::new();
        for _ in 0..10 {
            arb.step(&aw(false, 0), &w(true, 0x42), false, false);
            assert!(!arb.admitted(), "data without address must not admit");
        }
    }

    #[test]
    fn simultaneous_phases_admit_and_latch() {
        let mut arb = WriteArbiter::new();
        arb.step(&aw(true, 9), &w(true, 0x1234), false, false);
        assert!(arb.admitted());
        assert_eq!(arb.latched(), (9, 0x1234, 0x0F));
    }

    #[test]
    fn pulse_lasts_one_tick() {
        let mut arb = WriteArbiter::new();
        arb.step(&aw(true, 1), &w(true, 2), false, false);
        assert!(arb.admitted());
        // Requests still held, but the active pulse gates re-admission
        arb.step(&aw(true, 1), &w(true, 2), false, false);
        assert!(!arb.admitted(), "no back-to-back admission");
    }

    #[test]
    fn outstanding_response_blocks_until_ready() {
        let mut arb = WriteArbiter::new();
        arb.step(&aw(true, 1), &w(true, 2), true, false);
        assert!(!arb.admitted(), "unconsumed response must stall admission");
        arb.step(&aw(true, 1), &w(true, 2), true, true);
        assert!(arb.admitted(), "requester accepting the response unblocks");
    }
}
