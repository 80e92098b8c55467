use crate::capabilities::{Outputs, Tone, Utterance};
use crate::error::{GuideError, Result};

/// User interactions the gate is told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    PointerDown,
    TouchStart,
    KeyDown,
    PointerMove,
}

impl Interaction {
    /// Only presses and touches satisfy platform autoplay rules.
    pub fn unlocks_audio(self) -> bool {
        matches!(self, Interaction::PointerDown | Interaction::TouchStart)
    }

    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "pointerdown" | "mousedown" => Some(Interaction::PointerDown),
            "touchstart" => Some(Interaction::TouchStart),
            "keydown" => Some(Interaction::KeyDown),
            "pointermove" | "mousemove" => Some(Interaction::PointerMove),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Ignored,
    AlreadyUnlocked,
    Unlocked,
    /// Unlocked, but speech is missing so narration will be a no-op.
    UnlockedWithoutSpeech,
}

/// One-shot `Locked -> Unlocked` gate in front of narration.
#[derive(Clone, Debug, Default)]
pub struct AudioGate {
    unlocked: bool,
}

impl AudioGate {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Must run inside the gesture's event handler: the tone and the spoken
    /// confirmation are produced synchronously.
    pub fn on_interaction(
        &mut self,
        interaction: Interaction,
        out: &mut Outputs<'_>,
    ) -> Result<GateOutcome> {
        if self.unlocked {
            return Ok(GateOutcome::AlreadyUnlocked);
        }
        if !interaction.unlocks_audio() {
            return Ok(GateOutcome::Ignored);
        }

        if out.tone.is_available() {
            out.tone.play_tone(&Tone::ALERT).map_err(unlock_failure)?;
        }
        let outcome = if out.speech.is_supported() {
            out.speech.cancel_all();
            out.speech
                .speak(&Utterance::unlock_confirmation())
                .map_err(unlock_failure)?;
            GateOutcome::Unlocked
        } else {
            log::warn!("[gate] speech synthesis unavailable; narration disabled");
            GateOutcome::UnlockedWithoutSpeech
        };

        self.unlocked = true;
        log::info!("[gate] audio unlocked on {:?}", interaction);
        Ok(outcome)
    }
}

fn unlock_failure(e: GuideError) -> GuideError {
    log::error!("[gate] unlock attempt failed: {}", e);
    match e {
        GuideError::AudioUnlock(_) => e,
        other => GuideError::AudioUnlock(other.to_string()),
    }
}
