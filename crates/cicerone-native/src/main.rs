use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use cicerone_core::{
    parse_rows, Effects, FilterCriteria, Geolocation, GuideResult, GuideSession, Interaction,
    Outputs, PollHandle, Position, SelectionPolicy, SessionConfig, SessionId, SpeechOutput, Tone,
    ToneOutput, TrackingMode, Utterance, WatchHandle, WatchOptions, ALL_CATEGORIES,
};
use std::time::Duration;

/// Replay a recorded position track against a POI catalog and print what
/// the guide would narrate.
#[derive(Parser, Debug)]
#[command(name = "cicerone-native", version)]
struct Args {
    /// Catalog rows as returned by the backend (JSON array)
    #[arg(long)]
    catalog: PathBuf,
    /// Position track: JSON array of {"lat": .., "lon": ..}
    #[arg(long)]
    track: PathBuf,
    /// walking | driving
    #[arg(long, default_value = "walking")]
    mode: TrackingMode,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    /// Radius filter in km, 0 = unrestricted
    #[arg(long, default_value_t = 0.0)]
    radius: f64,
    /// Narrate the nearest POI instead of the first in catalog order
    #[arg(long)]
    nearest: bool,
    /// Never unlock audio (narrations are consumed silently)
    #[arg(long)]
    locked: bool,
}

#[derive(Default)]
struct ConsoleSpeech {
    spoken: usize,
}

impl SpeechOutput for ConsoleSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(&mut self, utterance: &Utterance) -> GuideResult<()> {
        self.spoken += 1;
        println!("    🗣  [{}] {}", utterance.lang, utterance.text);
        Ok(())
    }

    fn cancel_all(&mut self) {
        log::debug!("[speech] cancel");
    }
}

struct ConsoleTone;

impl ToneOutput for ConsoleTone {
    fn is_available(&self) -> bool {
        true
    }

    fn play_tone(&mut self, tone: &Tone) -> GuideResult<()> {
        log::debug!("[tone] {} Hz for {:.2}s", tone.frequency_hz, tone.duration_sec);
        Ok(())
    }
}

/// Geolocation that hands out handles; samples come from the track file.
#[derive(Default)]
struct ReplayGeolocation {
    next_handle: i32,
}

impl Geolocation for ReplayGeolocation {
    fn is_available(&self) -> bool {
        true
    }

    fn watch(&mut self, session: SessionId, options: &WatchOptions) -> GuideResult<WatchHandle> {
        self.next_handle += 1;
        log::info!(
            "[geo] watch {} for session {} {:?}",
            self.next_handle,
            session.get(),
            options
        );
        Ok(WatchHandle(self.next_handle))
    }

    fn start_polling(
        &mut self,
        session: SessionId,
        interval: Duration,
        _options: &WatchOptions,
    ) -> GuideResult<PollHandle> {
        self.next_handle += 1;
        log::info!(
            "[geo] poll {} every {:?} for session {}",
            self.next_handle,
            interval,
            session.get()
        );
        Ok(PollHandle(self.next_handle))
    }

    fn clear_watch(&mut self, handle: WatchHandle) {
        log::info!("[geo] clear watch {}", handle.0);
    }

    fn stop_polling(&mut self, handle: PollHandle) {
        log::info!("[geo] stop poll {}", handle.0);
    }
}

// The browser waits NARRATION_DELAY before speaking; a replay releases at once.
fn release(
    session: &mut GuideSession,
    speech: &mut ConsoleSpeech,
    effects: &Effects,
) -> anyhow::Result<()> {
    if let Some(token) = effects.speak_after_delay {
        session.release_utterance(token, speech)?;
        session.utterance_finished(token);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let rows = fs::read_to_string(&args.catalog)
        .with_context(|| format!("reading catalog {}", args.catalog.display()))?;
    let track: Vec<Position> = serde_json::from_str(
        &fs::read_to_string(&args.track)
            .with_context(|| format!("reading track {}", args.track.display()))?,
    )
    .context("parsing track")?;

    let config = SessionConfig {
        mode: args.mode,
        criteria: FilterCriteria {
            category: args.category.unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            search_text: args.search,
            radius_km: args.radius,
        },
        follow: false,
        selection: if args.nearest {
            SelectionPolicy::Nearest
        } else {
            SelectionPolicy::FirstMatch
        },
    };
    let mut session = GuideSession::new(config);
    let mut geo = ReplayGeolocation::default();
    let mut speech = ConsoleSpeech::default();
    let mut tone = ConsoleTone;

    let tracking = session.start_tracking(&mut geo)?;
    if !args.locked {
        let mut out = Outputs::new(&mut speech, &mut tone);
        let outcome = session.on_interaction(Interaction::PointerDown, &mut out)?;
        log::info!("[gate] {:?}", outcome);
    }

    let ticket = session.begin_catalog_load();
    let effects = session.complete_catalog_load(
        ticket,
        parse_rows(&rows),
        &mut Outputs::new(&mut speech, &mut tone),
    )?;
    println!("{}", session.status());
    release(&mut session, &mut speech, &effects)?;

    let narrated_before = speech.spoken;
    for (i, position) in track.iter().enumerate() {
        let effects =
            session.on_position(tracking, *position, &mut Outputs::new(&mut speech, &mut tone));
        println!(
            "#{:<4} {:.5}, {:.5}  visible={:<3} {:?}",
            i + 1,
            position.lat,
            position.lon,
            session.visible().len(),
            session.narration_state()
        );
        release(&mut session, &mut speech, &effects)?;
    }

    println!(
        "{} samples, {} narrations",
        track.len(),
        speech.spoken - narrated_before
    );
    session.stop_tracking(&mut geo);
    Ok(())
}
