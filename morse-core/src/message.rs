//! Messages and the primary/alternate message pair

use core::fmt::Write;
use heapless::String;

use crate::error::MorseError;
use crate::symbols;

/// Longest message text in bytes
pub const MAX_MESSAGE_LEN: usize = 32;

/// Banner text capacity: `"Sending:\n"` plus the message
pub const MAX_BANNER_LEN: usize = MAX_MESSAGE_LEN + 9;

/// Validated message: whitespace separated words of supported characters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    text: String<MAX_MESSAGE_LEN>,
}

impl Message {
    /// Validate and store `text`.
    ///
    /// Every non-whitespace character must be in the symbol table.
    pub fn new(text: &str) -> Result<Self, MorseError> {
        if text.split_whitespace().next().is_none() {
            return Err(MorseError::InvalidMessage("message has no words"));
        }
        if let Some(c) = text
            .chars()
            .find(|c| !c.is_whitespace() && !symbols::is_supported(*c))
        {
            return Err(MorseError::UnsupportedCharacter(c));
        }
        let text = String::try_from(text)
            .map_err(|_| MorseError::InvalidMessage("message longer than 32 bytes"))?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Words of the message, in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Two-row display text shown while the message is sent
    pub fn banner(&self) -> String<MAX_BANNER_LEN> {
        let mut banner = String::new();
        // Capacity covers the label plus the longest message
        let _ = write!(banner, "Sending:\n{}", self.text);
        banner
    }
}

/// Which of the two messages is active
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageSlot {
    /// First message ("SOS" by default), active at startup
    Primary,
    /// Second message ("OK" by default)
    Alternate,
}

impl MessageSlot {
    /// The other slot
    pub const fn toggled(&self) -> MessageSlot {
        match self {
            MessageSlot::Primary => MessageSlot::Alternate,
            MessageSlot::Alternate => MessageSlot::Primary,
        }
    }

    pub(crate) const fn as_u8(&self) -> u8 {
        match self {
            MessageSlot::Primary => 0,
            MessageSlot::Alternate => 1,
        }
    }

    pub(crate) const fn from_u8(raw: u8) -> MessageSlot {
        if raw & 1 == 0 {
            MessageSlot::Primary
        } else {
            MessageSlot::Alternate
        }
    }
}

/// The two candidate messages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBook {
    primary: Message,
    alternate: Message,
}

impl MessageBook {
    pub fn new(primary: Message, alternate: Message) -> Self {
        Self { primary, alternate }
    }

    /// Validate both texts
    pub fn from_text(primary: &str, alternate: &str) -> Result<Self, MorseError> {
        Ok(Self::new(Message::new(primary)?, Message::new(alternate)?))
    }

    pub fn get(&self, slot: MessageSlot) -> &Message {
        match slot {
            MessageSlot::Primary => &self.primary,
            MessageSlot::Alternate => &self.alternate,
        }
    }
}

impl Default for MessageBook {
    fn default() -> Self {
        Self {
            primary: Message {
                text: String::try_from("SOS").unwrap_or_default(),
            },
            alternate: Message {
                text: String::try_from("OK").unwrap_or_default(),
            },
        }
    }
}
