//! Property-based tests for control state and sequencing

use morse_core::*;
use proptest::prelude::*;

fn is_emit(trigger: &Trigger) -> bool {
    matches!(trigger, Trigger::EmitDot | Trigger::EmitDash)
}

proptest! {
    #[test]
    fn prop_toggle_parity(presses in 0u32..200) {
        let control = TransmitterControl::new();
        for _ in 0..presses {
            control.on_toggle_pressed();
        }
        let expected = if presses % 2 == 0 { MessageSlot::Primary } else { MessageSlot::Alternate };
        prop_assert_eq!(control.active_message(), expected);
        prop_assert_eq!(control.toggle_count(), presses);
    }

    #[test]
    fn prop_plan_structure(text in "[A-Z0-9]{1,6}( [A-Z0-9?/=]{1,6}){0,3}") {
        let message = Message::new(&text).unwrap();
        let plan = plan(&message).unwrap();

        // Starts and ends lit, never two pauses or two emits in a row
        prop_assert!(is_emit(plan.first().unwrap()));
        prop_assert!(is_emit(plan.last().unwrap()));
        for pair in plan.windows(2) {
            prop_assert_ne!(is_emit(&pair[0]), is_emit(&pair[1]));
        }

        let symbols: usize = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| encode(c).unwrap().len())
            .sum();
        prop_assert_eq!(plan.iter().filter(|t| is_emit(t)).count(), symbols);

        let words = text.split_whitespace().count();
        let word_gaps = plan.iter().filter(|t| **t == Trigger::PauseWord).count();
        prop_assert_eq!(word_gaps, words - 1);
    }

    #[test]
    fn prop_pass_duration_is_sum_of_phases(text in "[A-Z]{1,10}") {
        let message = Message::new(&text).unwrap();
        let plan = plan(&message).unwrap();
        let timing = TimingPolicy::STANDARD;

        let mut expected = 0u64;
        let chars: Vec<char> = text.chars().collect();
        for c in &chars {
            let encoding = encode(*c).unwrap();
            for symbol in encoding.iter() {
                expected += match symbol {
                    Symbol::Dot => 500,
                    Symbol::Dash => 1500,
                };
            }
            expected += 250 * (encoding.len() as u64 - 1);
        }
        expected += 750 * (chars.len() as u64 - 1);

        prop_assert_eq!(timing.plan_duration(&plan).as_millis(), expected);
    }

    #[test]
    fn prop_lowercase_rejected(text in "[a-z]{1,8}") {
        let first = text.chars().next().unwrap();
        prop_assert_eq!(Message::new(&text), Err(MorseError::UnsupportedCharacter(first)));
    }

    #[test]
    fn prop_transition_from_idle_and_back(index in 0usize..5) {
        let trigger = [
            Trigger::EmitDot,
            Trigger::EmitDash,
            Trigger::PauseSymbol,
            Trigger::PauseLetter,
            Trigger::PauseWord,
        ][index];
        let entered = transition(Phase::Idle, trigger);
        prop_assert_eq!(entered, Some(trigger.target()));
        prop_assert_eq!(transition(trigger.target(), trigger), Some(Phase::Idle));
    }
}
