//! Error types for the transmission core

use crate::fsm::{Phase, Trigger};
use crate::hal::HalError;

/// Errors raised by the transmission core
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MorseError {
    /// Character outside the symbol table
    UnsupportedCharacter(char),
    /// Message text rejected (empty, too long)
    InvalidMessage(&'static str),
    /// Trigger not allowed from the current phase
    InvalidTransition {
        from: Phase,
        trigger: Trigger,
    },
    /// Output or display capability failed
    Hal(HalError),
}

impl From<HalError> for MorseError {
    fn from(err: HalError) -> Self {
        MorseError::Hal(err)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Display for MorseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MorseError::UnsupportedCharacter(c) => {
                write!(f, "character {:?} has no Morse encoding", c)
            }
            MorseError::InvalidMessage(reason) => write!(f, "invalid message: {}", reason),
            MorseError::InvalidTransition { from, trigger } => {
                write!(f, "trigger {:?} not allowed from phase {:?}", trigger, from)
            }
            MorseError::Hal(err) => write!(f, "capability failure: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MorseError::Hal(err) => Some(err),
            _ => None,
        }
    }
}
