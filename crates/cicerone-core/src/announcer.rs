use crate::capabilities::{Outputs, SpeechOutput, Tone, Utterance, UtteranceToken};
use crate::error::{GuideError, Result};

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Silent,
    /// Tone played, waiting out the narration delay.
    Pending(Utterance),
    Speaking(UtteranceToken),
}

/// Sequences one narration at a time: cancel, tone, delay, speech.
///
/// The delay itself belongs to the platform: `announce` returns a token and
/// the front-end calls `release` with it once the delay has elapsed. Tokens
/// that were superseded or stopped in the meantime are ignored, so at most
/// one utterance is ever active.
#[derive(Clone, Debug)]
pub struct Announcer {
    phase: Phase,
    next_token: u64,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Silent,
            next_token: 1, // 0 is UtteranceToken::UNLOCK
        }
    }

    /// "Currently narrating" indicator.
    pub fn is_narrating(&self) -> bool {
        self.phase != Phase::Silent
    }

    pub fn announce(&mut self, text: String, out: &mut Outputs<'_>) -> Result<UtteranceToken> {
        if !out.speech.is_supported() {
            return Err(GuideError::SpeechUnsupported);
        }
        out.speech.cancel_all();
        if out.tone.is_available() {
            if let Err(e) = out.tone.play_tone(&Tone::ALERT) {
                log::warn!("[narration] alert tone failed: {}", e);
            }
        }
        let token = UtteranceToken(self.next_token);
        self.next_token += 1;
        self.phase = Phase::Pending(Utterance::new(token, text));
        Ok(token)
    }

    /// Speak the utterance that was waiting for `token`. Returns false when
    /// it was superseded or stopped before the delay elapsed.
    pub fn release(
        &mut self,
        token: UtteranceToken,
        speech: &mut dyn SpeechOutput,
    ) -> Result<bool> {
        let utterance = match &self.phase {
            Phase::Pending(u) if u.token == token => u.clone(),
            _ => return Ok(false),
        };
        if let Err(e) = speech.speak(&utterance) {
            self.phase = Phase::Silent;
            return Err(e);
        }
        self.phase = Phase::Speaking(token);
        Ok(true)
    }

    pub fn finished(&mut self, token: UtteranceToken) {
        if self.phase == Phase::Speaking(token) {
            self.phase = Phase::Silent;
        }
    }

    pub fn stop(&mut self, speech: &mut dyn SpeechOutput) {
        speech.cancel_all();
        self.phase = Phase::Silent;
    }
}
