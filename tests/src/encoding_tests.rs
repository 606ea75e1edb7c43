//! Symbol table and sequencing tests

use morse_core::*;
use rstest::rstest;

use crate::render_plan;

#[rstest]
#[case('S', "...")]
#[case('O', "---")]
#[case('K', "-.-")]
#[case('E', ".")]
#[case('0', "-----")]
#[case('(', "-.--.")]
#[case('$', "...-..-")]
fn test_encode_matches_table(#[case] c: char, #[case] expected: &str) {
    let encoding = encode(c).unwrap();
    let rendered: String = encoding.iter().map(Symbol::as_char).collect();
    assert_eq!(rendered, expected);
    assert_eq!(pattern(c), Some(expected));
}

#[rstest]
#[case('s')]
#[case('!')]
#[case(' ')]
#[case('é')]
fn test_encode_rejects_unknown(#[case] c: char) {
    assert_eq!(encode(c), Err(MorseError::UnsupportedCharacter(c)));
    assert!(!is_supported(c));
}

#[test]
fn test_every_supported_character_encodes() {
    println!("🔤 Checking the whole symbol table...");
    let mut count = 0;
    for c in supported_characters() {
        let encoding = encode(c).unwrap();
        assert!(!encoding.is_empty(), "{c:?} has an empty encoding");
        assert!(encoding.len() <= MAX_ENCODING_LEN);
        count += 1;
    }
    assert_eq!(count, 51);
    println!("  ✅ {count} characters");
}

#[rstest]
#[case("SOS", "... --- ...")]
#[case("OK", "--- -.-")]
#[case("E", ".")]
#[case("73 DE JA1", "--... ...-- / -.. . / .--- .- .----")]
#[case("  SOS   SOS ", "... --- ... / ... --- ...")]
fn test_plan_rendering(#[case] text: &str, #[case] expected: &str) {
    let plan = plan(&Message::new(text).unwrap()).unwrap();
    assert_eq!(render_plan(&plan), expected);
}

#[test]
fn test_plan_has_no_trailing_pause() {
    for text in ["SOS", "OK", "A B", "HELLO WORLD"] {
        let plan = plan(&Message::new(text).unwrap()).unwrap();
        let last = *plan.last().unwrap();
        assert!(matches!(last, Trigger::EmitDot | Trigger::EmitDash), "{text}: ends with {last:?}");
    }
}

#[rstest]
#[case("", MorseError::InvalidMessage("message has no words"))]
#[case("   ", MorseError::InvalidMessage("message has no words"))]
#[case("sos", MorseError::UnsupportedCharacter('s'))]
#[case("SOS!", MorseError::UnsupportedCharacter('!'))]
fn test_message_validation(#[case] text: &str, #[case] expected: MorseError) {
    assert_eq!(Message::new(text), Err(expected));
}

#[test]
fn test_message_too_long() {
    let text = "E".repeat(MAX_MESSAGE_LEN + 1);
    assert!(matches!(Message::new(&text), Err(MorseError::InvalidMessage(_))));
}

#[test]
fn test_standard_pass_durations() {
    let timing = TimingPolicy::STANDARD;
    let sos = plan(&Message::new("SOS").unwrap()).unwrap();
    let ok = plan(&Message::new("OK").unwrap()).unwrap();
    // 6x500 + 3x1500 + 6x250 + 2x750
    assert_eq!(timing.plan_duration(&sos).as_millis(), 10_500);
    // 1x500 + 5x1500 + 4x250 + 1x750
    assert_eq!(timing.plan_duration(&ok).as_millis(), 9_750);
}
