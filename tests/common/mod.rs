// Recording stand-ins for the platform capabilities, shared by the
// integration tests.

#![allow(dead_code)]

use cicerone_core::{
    Geolocation, GuideError, GuideResult, Outputs, Poi, PollHandle, Position, SessionId,
    SpeechOutput, Tone, ToneOutput, Utterance, WatchHandle, WatchOptions,
};
use std::collections::HashSet;
use std::time::Duration;

pub fn poi(id: i64, name: &str, category: &str, lat: f64, lon: f64) -> Poi {
    Poi {
        id,
        name: name.to_string(),
        description: format!("Descrizione di {name}"),
        category: category.to_string(),
        elevation: None,
        image_url: None,
        coordinates: Position::new(lat, lon),
    }
}

pub struct RecordingSpeech {
    pub supported: bool,
    pub fail: bool,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
}

impl Default for RecordingSpeech {
    fn default() -> Self {
        Self {
            supported: true,
            fail: false,
            spoken: Vec::new(),
            cancels: 0,
        }
    }
}

impl RecordingSpeech {
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl SpeechOutput for RecordingSpeech {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn speak(&mut self, utterance: &Utterance) -> GuideResult<()> {
        if !self.supported {
            return Err(GuideError::SpeechUnsupported);
        }
        if self.fail {
            return Err(GuideError::AudioUnlock("speech engine busy".into()));
        }
        self.spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.cancels += 1;
    }
}

pub struct RecordingTone {
    pub available: bool,
    pub fail: bool,
    pub played: Vec<Tone>,
}

impl Default for RecordingTone {
    fn default() -> Self {
        Self {
            available: true,
            fail: false,
            played: Vec::new(),
        }
    }
}

impl ToneOutput for RecordingTone {
    fn is_available(&self) -> bool {
        self.available
    }

    fn play_tone(&mut self, tone: &Tone) -> GuideResult<()> {
        if self.fail {
            return Err(GuideError::AudioUnlock("context suspended".into()));
        }
        self.played.push(*tone);
        Ok(())
    }
}

/// Speech + tone pair that hands out `Outputs` borrows.
#[derive(Default)]
pub struct Audio {
    pub speech: RecordingSpeech,
    pub tone: RecordingTone,
}

impl Audio {
    pub fn out(&mut self) -> Outputs<'_> {
        Outputs::new(&mut self.speech, &mut self.tone)
    }
}

pub struct RecordingGeo {
    pub available: bool,
    pub fail_poll: bool,
    next: i32,
    pub watches: Vec<(SessionId, WatchOptions)>,
    pub polls: Vec<(SessionId, Duration)>,
    pub cleared: Vec<WatchHandle>,
    pub stopped: Vec<PollHandle>,
    pub live_watches: HashSet<i32>,
    pub live_polls: HashSet<i32>,
}

impl Default for RecordingGeo {
    fn default() -> Self {
        Self {
            available: true,
            fail_poll: false,
            next: 0,
            watches: Vec::new(),
            polls: Vec::new(),
            cleared: Vec::new(),
            stopped: Vec::new(),
            live_watches: HashSet::new(),
            live_polls: HashSet::new(),
        }
    }
}

impl RecordingGeo {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn failing_poll() -> Self {
        Self {
            fail_poll: true,
            ..Self::default()
        }
    }
}

impl Geolocation for RecordingGeo {
    fn is_available(&self) -> bool {
        self.available
    }

    fn watch(&mut self, session: SessionId, options: &WatchOptions) -> GuideResult<WatchHandle> {
        self.next += 1;
        self.watches.push((session, *options));
        self.live_watches.insert(self.next);
        Ok(WatchHandle(self.next))
    }

    fn start_polling(
        &mut self,
        session: SessionId,
        interval: Duration,
        _options: &WatchOptions,
    ) -> GuideResult<PollHandle> {
        if self.fail_poll {
            return Err(GuideError::GeolocationUnavailable("no timers".into()));
        }
        self.next += 1;
        self.polls.push((session, interval));
        self.live_polls.insert(self.next);
        Ok(PollHandle(self.next))
    }

    fn clear_watch(&mut self, handle: WatchHandle) {
        self.cleared.push(handle);
        self.live_watches.remove(&handle.0);
    }

    fn stop_polling(&mut self, handle: PollHandle) {
        self.stopped.push(handle);
        self.live_polls.remove(&handle.0);
    }
}
