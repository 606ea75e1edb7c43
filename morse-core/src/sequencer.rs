//! Message → trigger sequencing

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::error::MorseError;
use crate::fsm::{TransmissionStateMachine, Trigger};
use crate::hal::{DisplaySink, OutputSink};
use crate::message::{Message, MAX_MESSAGE_LEN};
use crate::symbols::{self, Symbol, MAX_ENCODING_LEN};

/// Upper bound on triggers for one message: every character at the longest
/// encoding, each symbol followed by a gap
pub const MAX_PLAN_LEN: usize = MAX_MESSAGE_LEN * MAX_ENCODING_LEN * 2;

/// Trigger sequence for one pass
pub type Plan = Vec<Trigger, MAX_PLAN_LEN>;

/// Build the trigger sequence for `message`.
///
/// Gaps only go between units: no symbol gap after a character's last
/// symbol, no letter gap after a word's last character, no word gap after
/// the last word.
pub fn plan(message: &Message) -> Result<Plan, MorseError> {
    let mut plan = Plan::new();
    let mut words = message.words().peekable();

    while let Some(word) = words.next() {
        let mut chars = word.chars().peekable();
        while let Some(c) = chars.next() {
            let encoding = symbols::encode(c)?;
            let mut encoding = encoding.iter().peekable();
            while let Some(symbol) = encoding.next() {
                let emit = match symbol {
                    Symbol::Dot => Trigger::EmitDot,
                    Symbol::Dash => Trigger::EmitDash,
                };
                push(&mut plan, emit)?;
                if encoding.peek().is_some() {
                    push(&mut plan, Trigger::PauseSymbol)?;
                }
            }
            if chars.peek().is_some() {
                push(&mut plan, Trigger::PauseLetter)?;
            }
        }
        if words.peek().is_some() {
            push(&mut plan, Trigger::PauseWord)?;
        }
    }

    Ok(plan)
}

fn push(plan: &mut Plan, trigger: Trigger) -> Result<(), MorseError> {
    plan.push(trigger)
        .map_err(|_| MorseError::InvalidMessage("message too long to sequence"))
}

/// Send one full pass of `message`: show the banner, then fire every trigger
pub async fn send_message<O, D, S>(
    machine: &mut TransmissionStateMachine<'_, O, D>,
    display: &mut S,
    message: &Message,
) -> Result<(), MorseError>
where
    O: OutputSink,
    D: DelayNs,
    S: DisplaySink,
{
    let plan = plan(message)?;
    display.show(message.banner().as_str())?;
    debug!("Sending {} ({} triggers)", message.as_str(), plan.len());

    for trigger in plan {
        machine.fire(trigger).await?;
    }
    Ok(())
}
