//! Host bus-master model.
//!
//! Turns a queue of transaction-level operations into per-tick channel
//! signalling. Decisions are made from the bridge outputs observed at the
//! end of the previous tick, so the host is itself a clocked state
//! machine: it never reacts combinationally within a tick.

use std::collections::VecDeque;

use neuro_core::{
    ReadAddrChannel, ReadDataChannel, WriteAddrChannel, WriteDataChannel, WriteRespChannel,
};

/// Snapshot of the bridge outputs the host can see.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeView {
    pub awready: bool,
    pub wready: bool,
    pub bvalid: bool,
    pub arready: bool,
    pub rvalid: bool,
    pub rdata: u32,
}

/// Per-tick signals the host drives onto the bridge.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSignals {
    pub aw: WriteAddrChannel,
    pub w: WriteDataChannel,
    pub b: WriteRespChannel,
    pub ar: ReadAddrChannel,
    pub r: ReadDataChannel,
}

/// A queued host operation.
#[derive(Debug, Clone, Copy)]
enum HostOp {
    Write { addr: u32, data: u32, strb: u8 },
    Read,
}

/// Host transaction state.
#[derive(Debug, Clone, Copy)]
enum HostState {
    /// Nothing in flight.
    Idle,
    /// Address and data phases asserted, waiting for the admission pulse.
    WriteIssue { addr: u32, data: u32, strb: u8 },
    /// Phases dropped, waiting for the acknowledgement.
    AwaitAck,
    /// Read request asserted, waiting for the response.
    ReadIssue,
}

/// Transaction-level bus master.
pub struct HostMaster {
    queue: VecDeque<HostOp>,
    state: HostState,
    /// Data collected from completed reads, in issue order.
    reads: Vec<u32>,
    /// Write acknowledgements consumed.
    acks: u64,
}

impl HostMaster {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            state: HostState::Idle,
            reads: Vec::new(),
            acks: 0,
        }
    }

    /// Queue a masked write.
    pub fn enqueue_write(&mut self, addr: u32, data: u32, strb: u8) {
        self.queue.push_back(HostOp::Write { addr, data, strb });
    }

    /// Queue a read of the inferred-result register.
    pub fn enqueue_read(&mut self) {
        self.queue.push_back(HostOp::Read);
    }

    /// True when every queued operation has completed.
    #[must_use]
    pub fn idle(&self) -> bool {
        self.queue.is_empty() && matches!(self.state, HostState::Idle)
    }

    /// Read data collected so far, in issue order.
    #[must_use]
    pub fn reads(&self) -> &[u32] {
        &self.reads
    }

    /// Number of write acknowledgements consumed.
    #[must_use]
    pub fn acks(&self) -> u64 {
        self.acks
    }

    /// Advance one tick: fold in what the bridge showed at the end of the
    /// previous tick, then produce this tick's channel signals.
    pub fn drive(&mut self, view: &BridgeView) -> HostSignals {
        let mut consume_read = false;

        self.state = match self.state {
            HostState::Idle => HostState::Idle,
            HostState::WriteIssue { .. } if view.awready => HostState::AwaitAck,
            HostState::AwaitAck if view.bvalid => {
                self.acks += 1;
                HostState::Idle
            }
            HostState::ReadIssue if view.rvalid => {
                self.reads.push(view.rdata);
                consume_read = true;
                HostState::Idle
            }
            s => s,
        };

        // Pick up the next operation as soon as the slot frees
        if matches!(self.state, HostState::Idle) {
            if let Some(op) = self.queue.pop_front() {
                self.state = match op {
                    HostOp::Write { addr, data, strb } => HostState::WriteIssue { addr, data, strb },
                    HostOp::Read => HostState::ReadIssue,
                };
            }
        }

        let mut signals = HostSignals {
            // Always ready to accept a write acknowledgement
            b: WriteRespChannel { ready: true },
            ..HostSignals::default()
        };
        match self.state {
            HostState::WriteIssue { addr, data, strb } => {
                signals.aw = WriteAddrChannel { valid: true, addr };
                signals.w = WriteDataChannel {
                    valid: true,
                    data,
                    strb,
                };
            }
            HostState::ReadIssue => {
                signals.ar = ReadAddrChannel {
                    valid: true,
                    addr: 0,
                };
                signals.r = ReadDataChannel { ready: true };
            }
            HostState::Idle | HostState::AwaitAck => {}
        }
        // Hold rready through the tick that consumes the response
        if consume_read {
            signals.r = ReadDataChannel { ready: true };
        }
        signals
    }
}

impl Default for HostMaster {
    fn default() -> Self {
        Self::new()
    }
}
