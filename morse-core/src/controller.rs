//! Shared control cells between the foreground event source and the
//! background transmission task

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::fsm::Phase;
use crate::message::MessageSlot;

/// Lock-free view of the state machine's current phase.
/// Written only by the transmission task.
pub struct PhaseMonitor {
    phase: AtomicU8,
}

impl PhaseMonitor {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Idle.as_u8()),
        }
    }

    pub(crate) fn publish(&self, phase: Phase) {
        self.phase.store(phase.as_u8(), Ordering::Release);
    }

    /// Most recently published phase
    pub fn current(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Atomic control state shared with the transmission task.
/// Safe to update from interrupt handlers and other threads.
pub struct TransmitterControl {
    active: AtomicU8,
    shutdown: AtomicBool,
    toggles: AtomicU32,
    phase: PhaseMonitor,
}

impl TransmitterControl {
    /// Primary message active, no shutdown pending
    pub const fn new() -> Self {
        Self {
            active: AtomicU8::new(MessageSlot::Primary.as_u8()),
            shutdown: AtomicBool::new(false),
            toggles: AtomicU32::new(0),
            phase: PhaseMonitor::new(),
        }
    }

    /// Button press: switch to the other message.
    ///
    /// Takes effect at the start of the next pass. Returns the newly
    /// active slot.
    pub fn toggle_message(&self) -> MessageSlot {
        let previous = MessageSlot::from_u8(self.active.fetch_xor(1, Ordering::AcqRel));
        self.toggles.fetch_add(1, Ordering::Relaxed);
        let now = previous.toggled();
        info!("Active message toggled to {:?}", now);
        now
    }

    /// Slot to use for the next pass
    pub fn active_message(&self) -> MessageSlot {
        MessageSlot::from_u8(self.active.load(Ordering::Acquire))
    }

    /// Termination request; observed at the next pass boundary
    pub fn request_shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            info!("Shutdown requested, finishing current pass");
        }
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Number of button presses seen
    pub fn toggle_count(&self) -> u32 {
        self.toggles.load(Ordering::Relaxed)
    }

    /// Phase cell the state machine publishes into
    pub fn phase_monitor(&self) -> &PhaseMonitor {
        &self.phase
    }

    /// Event-source notification: button pressed
    pub fn on_toggle_pressed(&self) {
        self.toggle_message();
    }

    /// Event-source notification: environment asked us to stop
    pub fn on_termination_requested(&self) {
        self.request_shutdown();
    }
}

impl Default for TransmitterControl {
    fn default() -> Self {
        Self::new()
    }
}
