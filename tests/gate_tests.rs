// Audio unlock gate and narration sequencing (tone, delay, speech).
// Capabilities are recording mocks from tests/common.
mod common;

use cicerone_core::{
    Announcer, AudioGate, GateOutcome, GuideError, Interaction, Tone, UtteranceToken,
    UNLOCK_CONFIRMATION,
};
use common::{Audio, RecordingSpeech, RecordingTone};

#[test]
fn only_presses_and_touches_unlock() {
    let mut gate = AudioGate::default();
    let mut audio = Audio::default();
    for ignored in [Interaction::PointerMove, Interaction::KeyDown] {
        assert_eq!(gate.on_interaction(ignored, &mut audio.out()), Ok(GateOutcome::Ignored));
    }
    assert!(!gate.is_unlocked());
    assert!(audio.tone.played.is_empty());

    assert_eq!(
        gate.on_interaction(Interaction::TouchStart, &mut audio.out()),
        Ok(GateOutcome::Unlocked)
    );
    assert!(gate.is_unlocked());
}

#[test]
fn unlock_plays_tone_and_confirmation_once() {
    let mut gate = AudioGate::default();
    let mut audio = Audio::default();
    gate.on_interaction(Interaction::PointerDown, &mut audio.out())
        .unwrap();
    assert_eq!(audio.tone.played, vec![Tone::ALERT]);
    assert_eq!(audio.speech.texts(), vec![UNLOCK_CONFIRMATION]);
    assert_eq!(audio.speech.spoken[0].token, UtteranceToken::UNLOCK);
    assert_eq!(audio.speech.spoken[0].lang, "it-IT");

    assert_eq!(
        gate.on_interaction(Interaction::PointerDown, &mut audio.out()),
        Ok(GateOutcome::AlreadyUnlocked)
    );
    assert_eq!(audio.tone.played.len(), 1);
    assert_eq!(audio.speech.spoken.len(), 1);
}

#[test]
fn failed_attempt_stays_locked_and_retries() {
    let mut gate = AudioGate::default();
    let mut audio = Audio {
        tone: RecordingTone {
            fail: true,
            ..RecordingTone::default()
        },
        ..Audio::default()
    };
    let err = gate
        .on_interaction(Interaction::PointerDown, &mut audio.out())
        .unwrap_err();
    assert!(matches!(err, GuideError::AudioUnlock(_)));
    assert!(!gate.is_unlocked());

    audio.tone.fail = false;
    assert_eq!(
        gate.on_interaction(Interaction::PointerDown, &mut audio.out()),
        Ok(GateOutcome::Unlocked)
    );
}

#[test]
fn missing_speech_still_unlocks() {
    let mut gate = AudioGate::default();
    let mut audio = Audio {
        speech: RecordingSpeech::unsupported(),
        tone: RecordingTone {
            available: false,
            ..RecordingTone::default()
        },
    };
    assert_eq!(
        gate.on_interaction(Interaction::PointerDown, &mut audio.out()),
        Ok(GateOutcome::UnlockedWithoutSpeech)
    );
    assert!(gate.is_unlocked());
    assert!(audio.tone.played.is_empty());
}

#[test]
fn announce_waits_for_release() {
    let mut announcer = Announcer::new();
    let mut audio = Audio::default();
    let token = announcer
        .announce("Rocca".into(), &mut audio.out())
        .unwrap();
    assert_ne!(token, UtteranceToken::UNLOCK);
    assert_eq!(audio.speech.cancels, 1);
    assert_eq!(audio.tone.played.len(), 1);
    assert!(audio.speech.spoken.is_empty());
    assert!(announcer.is_narrating());

    assert_eq!(announcer.release(token, &mut audio.speech), Ok(true));
    assert_eq!(audio.speech.texts(), vec!["Rocca"]);
    assert!(announcer.is_narrating());

    announcer.finished(token);
    assert!(!announcer.is_narrating());
}

#[test]
fn newer_announcement_supersedes_pending_one() {
    let mut announcer = Announcer::new();
    let mut audio = Audio::default();
    let first = announcer.announce("uno".into(), &mut audio.out()).unwrap();
    let second = announcer.announce("due".into(), &mut audio.out()).unwrap();
    assert_eq!(announcer.release(first, &mut audio.speech), Ok(false));
    assert_eq!(announcer.release(second, &mut audio.speech), Ok(true));
    assert_eq!(audio.speech.texts(), vec!["due"]);

    // the end of a superseded utterance does not clear the indicator
    announcer.finished(first);
    assert!(announcer.is_narrating());
}

#[test]
fn stop_discards_pending_utterance() {
    let mut announcer = Announcer::new();
    let mut audio = Audio::default();
    let token = announcer.announce("Rocca".into(), &mut audio.out()).unwrap();
    announcer.stop(&mut audio.speech);
    assert!(!announcer.is_narrating());
    assert_eq!(announcer.release(token, &mut audio.speech), Ok(false));
    assert!(audio.speech.spoken.is_empty());
}

#[test]
fn announce_requires_speech() {
    let mut announcer = Announcer::new();
    let mut audio = Audio {
        speech: RecordingSpeech::unsupported(),
        ..Audio::default()
    };
    assert_eq!(
        announcer.announce("Rocca".into(), &mut audio.out()),
        Err(GuideError::SpeechUnsupported)
    );
    assert!(audio.tone.played.is_empty());
    assert!(!announcer.is_narrating());
}

#[test]
fn tone_failure_does_not_block_narration() {
    let mut announcer = Announcer::new();
    let mut audio = Audio {
        tone: RecordingTone {
            fail: true,
            ..RecordingTone::default()
        },
        ..Audio::default()
    };
    let token = announcer.announce("Rocca".into(), &mut audio.out()).unwrap();
    assert_eq!(announcer.release(token, &mut audio.speech), Ok(true));
}

#[test]
fn speech_failure_on_release_clears_indicator() {
    let mut announcer = Announcer::new();
    let mut audio = Audio::default();
    let token = announcer.announce("Rocca".into(), &mut audio.out()).unwrap();
    audio.speech.fail = true;
    assert!(announcer.release(token, &mut audio.speech).is_err());
    assert!(!announcer.is_narrating());
}

#[test]
fn event_names_map_to_interactions() {
    assert_eq!(Interaction::from_event_type("pointerdown"), Some(Interaction::PointerDown));
    assert_eq!(Interaction::from_event_type("touchstart"), Some(Interaction::TouchStart));
    assert_eq!(Interaction::from_event_type("scroll"), None);
}
