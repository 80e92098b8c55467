//! Platform capabilities the engine drives but does not implement.
//!
//! The web front-end backs these with browser APIs and the native replay
//! front-end with logging stand-ins. All of them are called from the single
//! event-processing thread.

use crate::constants::{
    SPEECH_LANG, SPEECH_RATE, TONE_DURATION_SEC, TONE_FREQUENCY_HZ, TONE_GAIN,
    UNLOCK_CONFIRMATION,
};
use crate::error::Result;
use crate::tracker::{SessionId, WatchOptions};
use std::time::Duration;

/// Identifies one utterance from emission to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceToken(pub(crate) u64);

impl UtteranceToken {
    /// Reserved for the audio unlock confirmation.
    pub const UNLOCK: UtteranceToken = UtteranceToken(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub token: UtteranceToken,
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
}

impl Utterance {
    pub fn new(token: UtteranceToken, text: impl Into<String>) -> Self {
        Self {
            token,
            text: text.into(),
            lang: SPEECH_LANG,
            rate: SPEECH_RATE,
        }
    }

    pub fn unlock_confirmation() -> Self {
        Self::new(UtteranceToken::UNLOCK, UNLOCK_CONFIRMATION)
    }
}

/// Short fixed-frequency sine tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub gain: f32,
    pub duration_sec: f64,
}

impl Tone {
    pub const ALERT: Tone = Tone {
        frequency_hz: TONE_FREQUENCY_HZ,
        gain: TONE_GAIN,
        duration_sec: TONE_DURATION_SEC,
    };
}

pub trait SpeechOutput {
    fn is_supported(&self) -> bool;
    /// Start speaking. Completion is reported back through
    /// `GuideSession::utterance_finished` with the utterance's token.
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;
    fn cancel_all(&mut self);
}

pub trait ToneOutput {
    fn is_available(&self) -> bool;
    fn play_tone(&mut self, tone: &Tone) -> Result<()>;
}

/// Handle of a continuous watch, as returned by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatchHandle(pub i32);

/// Handle of a periodic poll timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PollHandle(pub i32);

/// Platform position source. Samples and errors produced by a subscription
/// must be reported tagged with the `SessionId` it was opened for.
pub trait Geolocation {
    fn is_available(&self) -> bool;
    fn watch(&mut self, session: SessionId, options: &WatchOptions) -> Result<WatchHandle>;
    fn start_polling(
        &mut self,
        session: SessionId,
        interval: Duration,
        options: &WatchOptions,
    ) -> Result<PollHandle>;
    fn clear_watch(&mut self, handle: WatchHandle);
    fn stop_polling(&mut self, handle: PollHandle);
}

/// The audio side of the platform, borrowed for the length of one operation.
pub struct Outputs<'a> {
    pub speech: &'a mut dyn SpeechOutput,
    pub tone: &'a mut dyn ToneOutput,
}

impl<'a> Outputs<'a> {
    pub fn new(speech: &'a mut dyn SpeechOutput, tone: &'a mut dyn ToneOutput) -> Self {
        Self { speech, tone }
    }
}
