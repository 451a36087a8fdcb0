//! Write-response generator.
//!
//! Asserts one acknowledgement per admitted write, held until the
//! requester consumes it. The status code is always OKAY: the bridge
//! models no error conditions.

use neuro_core::RespCode;

/// Response-channel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespState {
    /// No acknowledgement outstanding.
    Idle,
    /// Acknowledgement asserted, waiting for `bready`.
    Pending,
}

/// Write-response state machine.
pub struct WriteResponder {
    state: RespState,
}

impl WriteResponder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RespState::Idle,
        }
    }

    pub fn reset(&mut self) {
        self.state = RespState::Idle;
    }

    /// `bvalid`: true while an acknowledgement is outstanding.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.state == RespState::Pending
    }

    #[must_use]
    pub fn state(&self) -> RespState {
        self.state
    }

    /// Response code accompanying the acknowledgement.
    #[must_use]
    pub const fn resp(&self) -> RespCode {
        RespCode::Okay
    }

    /// Advance one tick: rise on the tick after an admitted write, clear
    /// when the requester signals ready.
    pub fn step(&mut self, admitted: bool, bready: bool) {
        self.state = match self.state {
            RespState::Idle if admitted => RespState::Pending,
            RespState::Pending if bready => RespState::Idle,
            s => s,
        };
    }
}

impl Default for WriteResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_response_without_admission() {
        let mut resp = WriteResponder::new();
        for _ in 0..5 {
            resp.step(false, true);
            assert!(!resp.valid());
        }
    }

    #[test]
    fn response_holds_until_ready() {
        let mut resp = WriteResponder::new();
        resp.step(true, false);
        assert!(resp.valid());
        for _ in 0..4 {
            resp.step(false, false);
            assert!(resp.valid(), "bvalid must hold while bready is low");
        }
        resp.step(false, true);
        assert!(!resp.valid(), "bvalid clears on bready");
    }

    #[test]
    fn status_is_always_okay() {
        let resp = WriteResponder::new();
        assert_eq!(resp.resp(), RespCode::Okay);
    }
}
