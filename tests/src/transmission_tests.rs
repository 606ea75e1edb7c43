//! Transmission timing and control tests on tokio's paused clock

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use morse_core::hal::mock::MockDisplay;
use morse_core::test_utils::output_capture::{Clock, OutputCapture};
use morse_core::*;
use tokio::time::sleep;

use crate::{TokioClock, TokioDelay};

const SOS_MS: u64 = 10_500;
const OK_MS: u64 = 9_750;

fn transmitter<'a>(
    control: &'a TransmitterControl,
    capture: &OutputCapture<TokioClock>,
) -> Transmitter<'a, OutputCapture<TokioClock>, TokioDelay, MockDisplay> {
    Transmitter::new(
        TransmitterConfig::default(),
        control,
        capture.clone(),
        TokioDelay,
        MockDisplay::new(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_single_sos_pass_timing() {
    println!("📡 Sending one SOS pass...");
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    control.request_shutdown();
    let mut tx = transmitter(&control, &capture);

    let passes = tx.run().await.unwrap();

    assert_eq!(passes, 1);
    assert_eq!(clock.elapsed(), Duration::from_millis(SOS_MS));
    assert_eq!(capture.to_morse_string(), "...---...");

    let durations: Vec<u64> = capture.pulses().iter().map(|p| p.duration_ms).collect();
    assert_eq!(durations, [500, 500, 500, 1500, 1500, 1500, 500, 500, 500]);
    assert_eq!(capture.gaps(), [250, 250, 750, 250, 250, 750, 250, 250]);
    println!("  ✅ SOS pass took {}ms", clock.elapsed().as_millis());
}

#[tokio::test(start_paused = true)]
async fn test_indicators_never_both_lit() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    let mut tx = transmitter(&control, &capture);
    let finished = AtomicBool::new(false);

    let run = async {
        let result = tx.run().await;
        finished.store(true, Ordering::SeqCst);
        result
    };
    let events = async {
        sleep(Duration::from_millis(3_000)).await;
        control.on_toggle_pressed();
        sleep(Duration::from_millis(SOS_MS)).await;
        control.on_termination_requested();
    };
    let sampler = async {
        let mut samples = 0u32;
        while !finished.load(Ordering::SeqCst) {
            let (dot, dash) = capture.state();
            let phase = control.phase_monitor().current();
            assert!(!(dot && dash), "both indicators lit at {}ms", clock.now_ms());
            if dot {
                assert_eq!(phase, Phase::EmittingDot);
            }
            if dash {
                assert_eq!(phase, Phase::EmittingDash);
            }
            if !phase.is_emitting() {
                assert!(!dot && !dash, "lit during {:?}", phase);
            }
            samples += 1;
            sleep(Duration::from_millis(25)).await;
        }
        samples
    };

    let (result, _, samples) = tokio::join!(run, events, sampler);

    assert_eq!(result.unwrap(), 2);
    assert_eq!(capture.overlaps(), 0);
    assert!(samples > 700, "only {samples} samples");
    assert_eq!(control.phase_monitor().current(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mid_pass_applies_next_pass() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    let mut tx = transmitter(&control, &capture);

    let events = async {
        sleep(Duration::from_millis(2_000)).await;
        control.on_toggle_pressed();
        sleep(Duration::from_millis(SOS_MS)).await;
        control.on_termination_requested();
    };
    let (result, _) = tokio::join!(tx.run(), events);

    assert_eq!(result.unwrap(), 2);
    assert_eq!(clock.elapsed(), Duration::from_millis(SOS_MS + OK_MS));
    // Current pass kept sending SOS after the press
    assert_eq!(capture.to_morse_string(), "...---...----.-");
    assert_eq!(tx.display().history(), ["Sending:\nSOS", "Sending:\nOK"]);
}

#[tokio::test(start_paused = true)]
async fn test_double_toggle_mid_pass_keeps_message() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    let mut tx = transmitter(&control, &capture);

    let events = async {
        sleep(Duration::from_millis(1_000)).await;
        control.on_toggle_pressed();
        sleep(Duration::from_millis(500)).await;
        control.on_toggle_pressed();
        sleep(Duration::from_millis(SOS_MS)).await;
        control.on_termination_requested();
    };
    let (result, _) = tokio::join!(tx.run(), events);

    assert_eq!(result.unwrap(), 2);
    assert_eq!(control.toggle_count(), 2);
    assert_eq!(tx.display().history(), ["Sending:\nSOS", "Sending:\nSOS"]);
    assert_eq!(clock.elapsed(), Duration::from_millis(2 * SOS_MS));
}

#[tokio::test(start_paused = true)]
async fn test_termination_mid_pass_completes_pass() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    let mut tx = transmitter(&control, &capture);

    let events = async {
        sleep(Duration::from_millis(4_000)).await;
        control.on_termination_requested();
    };
    let (result, _) = tokio::join!(tx.run(), events);

    assert_eq!(result.unwrap(), 1);
    assert_eq!(clock.elapsed(), Duration::from_millis(SOS_MS));
    assert_eq!(capture.to_morse_string(), "...---...");
    assert_eq!(tx.display().clear_count(), 1);
    assert_eq!(tx.display().text(), "");
    assert_eq!(capture.state(), (false, false));
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing_with_words() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();
    control.request_shutdown();
    let timing = TimingPolicy::from_millis(100, 300, 100, 300, 700).unwrap();
    let config = TransmitterConfig::new("E T", "OK", timing).unwrap();

    let passes = run_transmitter(config, &control, capture.clone(), TokioDelay, MockDisplay::new())
        .await
        .unwrap();

    assert_eq!(passes, 1);
    // dot + word gap + dash
    assert_eq!(clock.elapsed(), Duration::from_millis(100 + 700 + 300));
    assert_eq!(capture.gaps(), [700]);
}

/// Display that rejects every update
struct BrokenDisplay;

impl DisplaySink for BrokenDisplay {
    fn show(&mut self, _text: &str) -> Result<(), HalError> {
        Err(HalError::DisplayError)
    }

    fn clear(&mut self) -> Result<(), HalError> {
        Err(HalError::DisplayError)
    }
}

#[tokio::test(start_paused = true)]
async fn test_display_failure_stops_transmitter() {
    let clock = TokioClock::start();
    let capture = OutputCapture::new(clock);
    let control = TransmitterControl::new();

    let result = run_transmitter(TransmitterConfig::default(), &control, capture.clone(), TokioDelay, BrokenDisplay).await;

    assert_eq!(result, Err(MorseError::Hal(HalError::DisplayError)));
    assert!(capture.events().is_empty());
    assert_eq!(clock.elapsed(), Duration::ZERO);
}
