//! Demo: push an image through the register bridge and print the
//! classifier's verdict.
//!
//! Flow: write all 256 cells, write the transfer-complete flag, wait for
//! the classifier pass, pulse reset to clear the flag (the only way it
//! clears), then read the held class id back through the bridge.
//!
//! With a path argument, the full per-tick bus trace is written there as
//! JSON.

use std::error::Error;
use std::path::PathBuf;

use machine_snn::{SnnSystem, TraceRecorder};
use neuro_core::Observable;
use snn_classifier::{SpikingClassifier, CLASSES, PIXELS};

/// Prototype set: class `c` lights up row `c` of the 16x16 image.
fn row_prototypes() -> [[u8; PIXELS]; CLASSES] {
    let mut protos = [[0_u8; PIXELS]; CLASSES];
    for (c, proto) in protos.iter_mut().enumerate() {
        for x in 0..16 {
            proto[c * 16 + x] = 0xFF;
        }
    }
    protos
}

fn run(trace_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let protos = row_prototypes();
    let classifier = SpikingClassifier::from_prototypes(&protos);
    let mut system = SnnSystem::new(classifier);
    if trace_path.is_some() {
        system.trace = Some(TraceRecorder::new());
    }

    let image = protos[3];
    system.load_image(&image);
    system.mark_transfer_complete();
    system
        .run_until_idle(10_000)
        .ok_or("image transfer did not complete")?;
    println!(
        "image transferred in {} ticks, new_image = {}",
        system.ticks().get(),
        system.bridge.query("new_image").expect("known path"),
    );

    system
        .run_until_classified(1_000)
        .ok_or("classifier never finished")?;

    // The flag clears only on reset; the classifier holds its result
    system.pulse_reset(2);
    system.host.enqueue_read();
    system
        .run_until_idle(100)
        .ok_or("result read did not complete")?;

    let class = system.host.reads().last().copied().unwrap_or(0);
    println!("inferred class: {class} (expected 3)");

    if let (Some(path), Some(trace)) = (trace_path, &system.trace) {
        trace.save(&path)?;
        println!("bus trace written to {}", path.display());
    }
    Ok(())
}

fn main() {
    let trace_path = std::env::args().nth(1).map(PathBuf::from);
    if let Err(e) = run(trace_path) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
