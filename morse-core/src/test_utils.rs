//! Test utilities for the transmission core

pub mod virtual_time {
    //! Virtual time simulation for deterministic testing

    use embedded_hal_async::delay::DelayNs;
    use std::boxed::Box;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    use super::output_capture::Clock;

    type Action = Box<dyn FnMut() + Send>;

    struct ScheduledEvent {
        time_ns: u64,
        action: Action,
    }

    struct VirtualTimeInner {
        current_ns: u64,
        scheduled_events: Vec<ScheduledEvent>,
    }

    /// Virtual clock advanced only by delays.
    ///
    /// Scheduled actions run, in time order, when a delay passes their
    /// deadline, so a test can inject button presses mid-pass.
    #[derive(Clone)]
    pub struct VirtualTime {
        inner: Arc<Mutex<VirtualTimeInner>>,
    }

    impl VirtualTime {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(VirtualTimeInner {
                    current_ns: 0,
                    scheduled_events: Vec::new(),
                })),
            }
        }

        /// Current virtual time in milliseconds
        pub fn now_ms(&self) -> u64 {
            self.inner.lock().unwrap().current_ns / 1_000_000
        }

        /// Run `action` once the clock reaches `at_ms`
        pub fn schedule(&self, at_ms: u64, action: impl FnMut() + Send + 'static) {
            self.inner.lock().unwrap().scheduled_events.push(ScheduledEvent {
                time_ns: at_ms * 1_000_000,
                action: Box::new(action),
            });
        }

        /// Advance the clock, running due actions along the way
        pub fn advance_ns(&self, ns: u64) {
            let target = self.inner.lock().unwrap().current_ns + ns;
            loop {
                let due = {
                    let mut inner = self.inner.lock().unwrap();
                    let next = inner
                        .scheduled_events
                        .iter()
                        .enumerate()
                        .filter(|(_, event)| event.time_ns <= target)
                        .min_by_key(|&(index, event)| (event.time_ns, index))
                        .map(|(index, _)| index);
                    match next {
                        Some(index) => {
                            let event = inner.scheduled_events.remove(index);
                            inner.current_ns = inner.current_ns.max(event.time_ns);
                            Some(event)
                        }
                        None => {
                            inner.current_ns = target;
                            None
                        }
                    }
                };
                // Lock released: actions may schedule further events
                match due {
                    Some(mut event) => (event.action)(),
                    None => break,
                }
            }
        }

        /// Number of actions not yet run
        pub fn pending_events(&self) -> usize {
            self.inner.lock().unwrap().scheduled_events.len()
        }

        /// Delay provider bound to this clock
        pub fn delay(&self) -> VirtualDelay {
            VirtualDelay { clock: self.clone() }
        }
    }

    impl Default for VirtualTime {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for VirtualTime {
        fn now_ms(&self) -> u64 {
            VirtualTime::now_ms(self)
        }
    }

    /// `DelayNs` that advances a [`VirtualTime`] instead of sleeping
    #[derive(Clone)]
    pub struct VirtualDelay {
        clock: VirtualTime,
    }

    impl DelayNs for VirtualDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.clock.advance_ns(ns as u64);
        }

        async fn delay_us(&mut self, us: u32) {
            self.clock.advance_ns(us as u64 * 1_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.clock.advance_ns(ms as u64 * 1_000_000);
        }
    }
}

pub mod output_capture {
    //! Output capture and analysis for testing

    use std::string::String;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    use crate::hal::{HalError, OutputSink};
    use crate::symbols::Symbol;

    /// Millisecond time source used to stamp captured events
    pub trait Clock {
        fn now_ms(&self) -> u64;
    }

    /// Indicator state after one `set_*` call
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IndicatorEvent {
        pub at_ms: u64,
        pub dot: bool,
        pub dash: bool,
    }

    /// One lit period of an indicator
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pulse {
        pub symbol: Symbol,
        pub start_ms: u64,
        pub duration_ms: u64,
    }

    #[derive(Default)]
    struct CaptureInner {
        dot: bool,
        dash: bool,
        events: Vec<IndicatorEvent>,
        overlaps: usize,
    }

    /// Records every indicator change with a timestamp.
    /// Clones share the same buffer, so a test keeps one and hands one to the
    /// transmitter.
    #[derive(Clone)]
    pub struct OutputCapture<C> {
        clock: C,
        inner: Arc<Mutex<CaptureInner>>,
    }

    impl<C: Clock> OutputCapture<C> {
        pub fn new(clock: C) -> Self {
            Self {
                clock,
                inner: Arc::new(Mutex::new(CaptureInner::default())),
            }
        }

        /// Current (dot, dash) state
        pub fn state(&self) -> (bool, bool) {
            let inner = self.inner.lock().unwrap();
            (inner.dot, inner.dash)
        }

        /// Get all captured events
        pub fn events(&self) -> Vec<IndicatorEvent> {
            self.inner.lock().unwrap().events.clone()
        }

        /// Number of times both indicators were lit together
        pub fn overlaps(&self) -> usize {
            self.inner.lock().unwrap().overlaps
        }

        /// Lit periods, in order
        pub fn pulses(&self) -> Vec<Pulse> {
            let inner = self.inner.lock().unwrap();
            let mut pulses = Vec::new();
            let mut dot_start: Option<u64> = None;
            let mut dash_start: Option<u64> = None;

            for event in &inner.events {
                match (dot_start, event.dot) {
                    (None, true) => dot_start = Some(event.at_ms),
                    (Some(start), false) => {
                        pulses.push(Pulse { symbol: Symbol::Dot, start_ms: start, duration_ms: event.at_ms - start });
                        dot_start = None;
                    }
                    _ => {}
                }
                match (dash_start, event.dash) {
                    (None, true) => dash_start = Some(event.at_ms),
                    (Some(start), false) => {
                        pulses.push(Pulse { symbol: Symbol::Dash, start_ms: start, duration_ms: event.at_ms - start });
                        dash_start = None;
                    }
                    _ => {}
                }
            }
            pulses
        }

        /// Dark time between consecutive pulses
        pub fn gaps(&self) -> Vec<u64> {
            self.pulses()
                .windows(2)
                .map(|pair| pair[1].start_ms - (pair[0].start_ms + pair[0].duration_ms))
                .collect()
        }

        /// Pulses rendered as `.`/`-`
        pub fn to_morse_string(&self) -> String {
            self.pulses().iter().map(|pulse| pulse.symbol.as_char()).collect()
        }

        fn record(&self, update: impl FnOnce(&mut CaptureInner)) {
            let at_ms = self.clock.now_ms();
            let mut inner = self.inner.lock().unwrap();
            update(&mut inner);
            if inner.dot && inner.dash {
                inner.overlaps += 1;
            }
            let event = IndicatorEvent { at_ms, dot: inner.dot, dash: inner.dash };
            inner.events.push(event);
        }
    }

    impl<C: Clock> OutputSink for OutputCapture<C> {
        fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError> {
            self.record(|inner| inner.dot = on);
            Ok(())
        }

        fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError> {
            self.record(|inner| inner.dash = on);
            Ok(())
        }
    }
}
