//! Fixed-function rate-coded integrate-and-fire classifier model.
//!
//! The classifier consumes the register bridge's assembled image and its
//! "new image" level, and produces an inferred class id on a parallel
//! output. It is the external collaborator on the far side of the bridge:
//! the bridge samples `class_id()` combinationally every tick and never
//! reaches into the classifier's state.
//!
//! The model is cycle-accurate at pixel granularity: a rising edge on
//! `new_image` starts an integration pass that consumes one pixel per
//! tick, driving ten leaky integrate-and-fire output neurons. When the
//! last pixel has been integrated, the winner-take-all stage latches the
//! id of the neuron with the highest membrane potential. The output
//! register holds its value until the next pass completes — in particular
//! it survives a bridge-side reset, which is what lets the host collect a
//! result after clearing the transfer flag.

use neuro_core::{Observable, Value};

/// Pixels per image (matches the bridge's image buffer).
pub const PIXELS: usize = 256;

/// Number of output neurons / classes.
pub const CLASSES: usize = 10;

/// Leak shift: each tick a neuron loses 1/16th of its potential.
const LEAK_SHIFT: u32 = 4;

/// Ten leaky integrate-and-fire output neurons with a winner-take-all
/// readout.
pub struct SpikingClassifier {
    /// Per-class synaptic weight rows, one weight per pixel.
    weights: [[i8; PIXELS]; CLASSES],
    /// Membrane potentials.
    potential: [i32; CLASSES],
    /// Next pixel to integrate.
    index: usize,
    /// An integration pass is in flight.
    busy: bool,
    /// Previous `new_image` level, for rising-edge detection.
    prev_new_image: bool,
    /// Latched winner id, zero until the first pass completes.
    class_id: u32,
    /// Pixel snapshot taken at the start of the pass.
    frame: [u8; PIXELS],
}

impl SpikingClassifier {
    /// Create a classifier with explicit weight rows.
    #[must_use]
    pub fn new(weights: [[i8; PIXELS]; CLASSES]) -> Self {
        Self {
            weights,
            potential: [0; CLASSES],
            index: 0,
            busy: false,
            prev_new_image: false,
            class_id: 0,
            frame: [0; PIXELS],
        }
    }

    /// Build weight rows from per-class prototype images.
    ///
    /// Each weight is the centred, halved prototype intensity, so a neuron
    /// integrates highest on the image most correlated with its prototype.
    #[must_use]
    pub fn from_prototypes(prototypes: &[[u8; PIXELS]; CLASSES]) -> Self {
        let mut weights = [[0_i8; PIXELS]; CLASSES];
        for (row, proto) in weights.iter_mut().zip(prototypes.iter()) {
            for (w, &p) in row.iter_mut().zip(proto.iter()) {
                *w = ((i32::from(p) - 128) / 2) as i8;
            }
        }
        Self::new(weights)
    }

    /// Inferred class id, held between passes.
    #[must_use]
    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    /// True while an integration pass is in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Advance one tick with the bridge-facing inputs.
    pub fn sample(&mut self, image: &[u8; PIXELS], new_image: bool) {
        let start = new_image && !self.prev_new_image;
        self.prev_new_image = new_image;

        if start {
            self.frame = *image;
            self.potential = [0; CLASSES];
            self.index = 0;
            self.busy = true;
            return;
        }

        if !self.busy {
            return;
        }

        if self.index < PIXELS {
            let pixel = i32::from(self.frame[self.index]);
            for (p, row) in self.potential.iter_mut().zip(self.weights.iter()) {
                *p -= *p >> LEAK_SHIFT;
                *p += i32::from(row[self.index]) * pixel;
            }
            self.index += 1;
        } else {
            // Winner-take-all readout
            let mut winner = 0;
            let mut best = self.potential[0];
            for (c, &p) in self.potential.iter().enumerate().skip(1) {
                if p > best {
                    best = p;
                    winner = c;
                }
            }
            self.class_id = winner as u32;
            self.busy = false;
        }
    }
}

impl Observable for SpikingClassifier {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(index) = path.strip_prefix("potential.") {
            let c: usize = index.parse().ok()?;
            return self.potential.get(c).map(|&p| Value::U64(p.unsigned_abs().into()));
        }
        match path {
            "busy" => Some(Value::Bool(self.busy)),
            "index" => Some(Value::U32(self.index as u32)),
            "class_id" => Some(Value::U32(self.class_id)),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &["busy", "index", "class_id", "potential.*"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn run_pass(clf: &mut SpikingClassifier, image: &[u8; PIXELS]) {
        // Drop the level first so the next sample sees a rising edge
        clf.sample(image, false);
        clf.sample(image, true);
        assert!(clf.busy());
        while clf.busy() {
            clf.sample(image, true);
        }
    }

    #[test]
    fn classifies_each_prototype_as_itself() {
        let protos = row_prototypes();
        let mut clf = SpikingClassifier::from_prototypes(&protos);
        for (c, proto) in protos.iter().enumerate() {
            run_pass(&mut clf, proto);
            assert_eq!(clf.class_id(), c as u32, "prototype {c} misclassified");
        }
    }

    #[test]
    fn pass_takes_one_tick_per_pixel_plus_readout() {
        let protos = row_prototypes();
        let mut clf = SpikingClassifier::from_prototypes(&protos);
        let image = protos[3];
        clf.sample(&image, true);
        let mut ticks = 0;
        while clf.busy() {
            clf.sample(&image, true);
            ticks += 1;
        }
        assert_eq!(ticks, PIXELS + 1, "one tick per pixel plus the readout tick");
    }

    #[test]
    fn level_held_new_image_does_not_restart() {
        let protos = row_prototypes();
        let mut clf = SpikingClassifier::from_prototypes(&protos);
        run_pass(&mut clf, &protos[5]);
        let id = clf.class_id();
        // Level still high: no rising edge, no new pass
        for _ in 0..10 {
            clf.sample(&protos[1], true);
        }
        assert!(!clf.busy());
        assert_eq!(clf.class_id(), id);
    }

    #[test]
    fn output_holds_between_passes() {
        let protos = row_prototypes();
        let mut clf = SpikingClassifier::from_prototypes(&protos);
        run_pass(&mut clf, &protos[8]);
        clf.sample(&[0; PIXELS], false);
        clf.sample(&[0; PIXELS], false);
        assert_eq!(clf.class_id(), 8);
    }

    #[test]
    fn frame_is_snapshotted_at_pass_start() {
        let protos = row_prototypes();
        let mut clf = SpikingClassifier::from_prototypes(&protos);
        let image = protos[2];
        clf.sample(&image, true);
        // The live image mutates mid-pass; the pass must use the snapshot
        let scrambled = protos[9];
        while clf.busy() {
            clf.sample(&scrambled, true);
        }
        assert_eq!(clf.class_id(), 2);
    }
}
