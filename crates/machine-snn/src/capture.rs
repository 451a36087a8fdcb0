//! Per-tick transaction trace capture.
//!
//! Records the bus-visible signals of every tick for offline inspection.
//! Frames serialise to JSON; the format is a flat array so external
//! waveform tooling can consume it without a schema.

use std::fmt;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One tick's worth of bus-visible signals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TraceFrame {
    pub tick: u64,
    pub awvalid: bool,
    pub awready: bool,
    pub wvalid: bool,
    pub bvalid: bool,
    pub arvalid: bool,
    pub rvalid: bool,
    pub rdata: u32,
    pub new_image: bool,
    pub class_id: u32,
}

/// Trace export failure.
#[derive(Debug)]
pub enum CaptureError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "trace file error: {e}"),
            Self::Encode(e) => write!(f, "trace encoding error: {e}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Accumulates trace frames across a run.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    frames: Vec<TraceFrame>,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn record(&mut self, frame: TraceFrame) {
        self.frames.push(frame);
    }

    #[must_use]
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    /// Serialise the whole trace to a JSON array.
    pub fn to_json(&self) -> Result<String, CaptureError> {
        Ok(serde_json::to_string_pretty(&self.frames)?)
    }

    /// Write the trace to a file as JSON.
    pub fn save(&self, path: &Path) -> Result<(), CaptureError> {
        let mut file = File::create(path)?;
        file.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_round_trips_through_json() {
        let mut rec = TraceRecorder::new();
        rec.record(TraceFrame {
            tick: 3,
            awvalid: true,
            rdata: 7,
            ..TraceFrame::default()
        });
        let json = rec.to_json().expect("encode");
        let frames: Vec<TraceFrame> = serde_json::from_str(&json).expect("decode");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tick, 3);
        assert!(frames[0].awvalid);
        assert_eq!(frames[0].rdata, 7);
    }
}
