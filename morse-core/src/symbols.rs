//! Fixed Morse symbol table

use heapless::Vec;

use crate::error::MorseError;

/// Longest pattern in the table (`$` = `...-..-`) plus headroom
pub const MAX_ENCODING_LEN: usize = 8;

/// One Morse signal unit
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Short element, shown on the dot indicator
    Dot,
    /// Long element, shown on the dash indicator
    Dash,
}

impl Symbol {
    /// Pattern character used in the table
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

/// Symbol sequence for one character
pub type Encoding = Vec<Symbol, MAX_ENCODING_LEN>;

/// Character → pattern table. Letters, digits, then punctuation.
static MORSE_TABLE: [(char, &str); 51] = [
    ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."),
    ('E', "."), ('F', "..-."), ('G', "--."), ('H', "...."),
    ('I', ".."), ('J', ".---"), ('K', "-.-"), ('L', ".-.."),
    ('M', "--"), ('N', "-."), ('O', "---"), ('P', ".--."),
    ('Q', "--.-"), ('R', ".-."), ('S', "..."), ('T', "-"),
    ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"),
    ('Y', "-.--"), ('Z', "--.."),
    ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"),
    ('4', "....-"), ('5', "....."), ('6', "-...."), ('7', "--..."),
    ('8', "---.."), ('9', "----."),
    ('+', ".-.-."), ('-', "-....-"), ('/', "-..-."), ('=', "-...-"),
    (':', "---..."), ('.', ".-.-.-"), ('$', "...-..-"), ('?', "..--.."),
    ('@', ".--.-."), ('&', ".-..."), ('"', ".-..-."), ('_', "..--.-"),
    ('|', "--...-"), ('(', "-.--."), (')', "-.--.-"),
];

/// Table pattern for `c`, if supported
pub fn pattern(c: char) -> Option<&'static str> {
    MORSE_TABLE
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, pattern)| *pattern)
}

/// Returns true if `c` can be encoded
pub fn is_supported(c: char) -> bool {
    pattern(c).is_some()
}

/// Encode one character.
///
/// No normalization is applied: lowercase letters and whitespace are misses.
pub fn encode(c: char) -> Result<Encoding, MorseError> {
    let pattern = pattern(c).ok_or(MorseError::UnsupportedCharacter(c))?;
    let mut encoding = Encoding::new();
    for mark in pattern.chars() {
        let symbol = if mark == '.' { Symbol::Dot } else { Symbol::Dash };
        // Table patterns never exceed MAX_ENCODING_LEN
        let _ = encoding.push(symbol);
    }
    Ok(encoding)
}

/// Every supported character, in table order
pub fn supported_characters() -> impl Iterator<Item = char> {
    MORSE_TABLE.iter().map(|(c, _)| *c)
}
