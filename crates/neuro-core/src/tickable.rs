//! Trait for components that can be advanced by clock ticks.

use crate::Ticks;

/// A component that can be advanced by one clock tick.
///
/// This is the core abstraction for cycle-accurate modelling. Every
/// self-contained component (register bridge, classifier, whole system)
/// implements this trait.
pub trait Tickable {
    /// Advance the component by one clock tick.
    ///
    /// All next-state values must be computed from pre-tick state plus
    /// current inputs and committed together; a caller observing the
    /// component between `tick()` calls sees a consistent post-tick state.
    fn tick(&mut self);

    /// Advance the component by multiple ticks.
    ///
    /// Default implementation calls `tick()` in a loop. Components may
    /// override for efficiency, but must produce identical results.
    fn tick_n(&mut self, count: Ticks) {
        for _ in 0..count.get() {
            self.tick();
        }
    }
}
