//! GPIO indicator adapter tests against embedded-hal-mock pins

use embedded_hal_mock::eh1::pin::{Mock as PinMock, State, Transaction as PinTransaction};
use morse_core::*;

use crate::TokioDelay;

#[test]
fn test_active_high_levels() {
    let dot = PinMock::new(&[PinTransaction::set(State::High), PinTransaction::set(State::Low)]);
    let dash = PinMock::new(&[PinTransaction::set(State::High), PinTransaction::set(State::Low)]);
    let mut leds = EmbeddedHalIndicators::new(dot, dash, false);

    leds.set_dot_indicator(true).unwrap();
    leds.set_dot_indicator(false).unwrap();
    leds.set_dash_indicator(true).unwrap();
    leds.set_dash_indicator(false).unwrap();

    let (mut dot, mut dash) = leds.release();
    dot.done();
    dash.done();
}

#[test]
fn test_active_low_levels() {
    let dot = PinMock::new(&[PinTransaction::set(State::Low), PinTransaction::set(State::High)]);
    let dash = PinMock::new(&[PinTransaction::set(State::High)]);
    let mut leds = EmbeddedHalIndicators::new(dot, dash, true);

    leds.set_dot_indicator(true).unwrap();
    leds.all_off().unwrap();

    let (mut dot, mut dash) = leds.release();
    dot.done();
    dash.done();
}

#[tokio::test(start_paused = true)]
async fn test_dot_fire_drives_pins() {
    // Entry lights then darkens the dot; exit forces both off again
    let dot = PinMock::new(&[
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
        PinTransaction::set(State::Low),
    ]);
    let dash = PinMock::new(&[PinTransaction::set(State::Low)]);
    let leds = EmbeddedHalIndicators::new(dot, dash, false);
    let mut machine = TransmissionStateMachine::new(leds, TokioDelay, TimingPolicy::STANDARD);

    let start = tokio::time::Instant::now();
    machine.fire(Trigger::EmitDot).await.unwrap();
    assert_eq!(start.elapsed().as_millis(), 500);

    let (leds, _) = machine.into_parts();
    let (mut dot, mut dash) = leds.release();
    dot.done();
    dash.done();
}

#[tokio::test(start_paused = true)]
async fn test_pause_only_forces_pins_off() {
    let dot = PinMock::new(&[PinTransaction::set(State::Low)]);
    let dash = PinMock::new(&[PinTransaction::set(State::Low)]);
    let leds = EmbeddedHalIndicators::new(dot, dash, false);
    let mut machine = TransmissionStateMachine::new(leds, TokioDelay, TimingPolicy::STANDARD);

    let start = tokio::time::Instant::now();
    machine.fire(Trigger::PauseLetter).await.unwrap();
    assert_eq!(start.elapsed().as_millis(), 750);
    assert_eq!(machine.phase(), Phase::Idle);

    let (leds, _) = machine.into_parts();
    let (mut dot, mut dash) = leds.release();
    dot.done();
    dash.done();
}
