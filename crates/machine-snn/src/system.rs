//! Host + bridge + classifier on one clock.
//!
//! Each system tick snapshots every component's outputs first, then
//! advances every component with those snapshots — so a component only
//! ever sees the previous tick's state of its neighbours, matching the
//! globally-atomic commit model of the hardware.

use neuro_core::{Tickable, Ticks, STRB_ALL};
use snn_classifier::SpikingClassifier;
use snn_regbridge::{BridgeInputs, RegBridge, FLAG_ADDR, IMAGE_CELLS};

use crate::capture::{TraceFrame, TraceRecorder};
use crate::host::{BridgeView, HostMaster};

/// The full system model.
pub struct SnnSystem {
    pub host: HostMaster,
    pub bridge: RegBridge,
    pub classifier: SpikingClassifier,
    /// Synchronous reset, level-held until released.
    reset: bool,
    ticks: Ticks,
    /// Optional per-tick trace capture.
    pub trace: Option<TraceRecorder>,
}

impl SnnSystem {
    #[must_use]
    pub fn new(classifier: SpikingClassifier) -> Self {
        Self {
            host: HostMaster::new(),
            bridge: RegBridge::new(),
            classifier,
            reset: false,
            ticks: Ticks::ZERO,
            trace: None,
        }
    }

    /// Assert or release the synchronous reset level.
    pub fn set_reset(&mut self, reset: bool) {
        self.reset = reset;
    }

    /// Ticks elapsed since construction.
    #[must_use]
    pub fn ticks(&self) -> Ticks {
        self.ticks
    }

    /// Queue a full-image transfer: one masked write per cell.
    pub fn load_image(&mut self, image: &[u8; IMAGE_CELLS]) {
        for (i, &pixel) in image.iter().enumerate() {
            self.host.enqueue_write(i as u32, u32::from(pixel), 0x01);
        }
    }

    /// Queue the transfer-complete flag write.
    pub fn mark_transfer_complete(&mut self) {
        self.host.enqueue_write(FLAG_ADDR, 1, STRB_ALL);
    }

    /// Run until the host has retired every queued operation.
    ///
    /// Returns the number of ticks spent, or `None` if `max_ticks` elapsed
    /// first (a stalled transaction never completes by design, so callers
    /// bound the wait).
    pub fn run_until_idle(&mut self, max_ticks: u64) -> Option<u64> {
        for spent in 0..max_ticks {
            if self.host.idle() {
                return Some(spent);
            }
            self.tick();
        }
        None
    }

    /// Run until the classifier starts and then finishes a pass.
    pub fn run_until_classified(&mut self, max_ticks: u64) -> Option<u64> {
        let mut started = self.classifier.busy();
        for spent in 0..max_ticks {
            if started && !self.classifier.busy() {
                return Some(spent);
            }
            self.tick();
            started = started || self.classifier.busy();
        }
        None
    }

    /// Hold reset for `ticks` clock ticks, then release it.
    pub fn pulse_reset(&mut self, ticks: u64) {
        self.set_reset(true);
        self.tick_n(Ticks::new(ticks));
        self.set_reset(false);
    }

    fn view(&self) -> BridgeView {
        BridgeView {
            awready: self.bridge.awready(),
            wready: self.bridge.wready(),
            bvalid: self.bridge.bvalid(),
            arready: self.bridge.arready(),
            rvalid: self.bridge.rvalid(),
            rdata: self.bridge.rdata(),
        }
    }
}

impl Tickable for SnnSystem {
    fn tick(&mut self) {
        // Snapshot phase: every component sees last tick's outputs
        let view = self.view();
        let image = *self.bridge.image();
        let new_image = self.bridge.new_image();
        let class_id = self.classifier.class_id();

        // Commit phase
        let signals = self.host.drive(&view);
        self.classifier.sample(&image, new_image);
        let inputs = BridgeInputs {
            reset: self.reset,
            aw: signals.aw,
            w: signals.w,
            b: signals.b,
            ar: signals.ar,
            r: signals.r,
            class_id,
        };
        self.bridge.tick(&inputs);

        if let Some(trace) = &mut self.trace {
            trace.record(TraceFrame {
                tick: self.ticks.get(),
                awvalid: signals.aw.valid,
                awready: self.bridge.awready(),
                wvalid: signals.w.valid,
                bvalid: self.bridge.bvalid(),
                arvalid: signals.ar.valid,
                rvalid: self.bridge.rvalid(),
                rdata: self.bridge.rdata(),
                new_image: self.bridge.new_image(),
                class_id,
            });
        }

        self.ticks += Ticks::new(1);
    }
}
