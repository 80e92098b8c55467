use cicerone_core::{GuideError, GuideResult, Tone, ToneOutput};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Alert tone on a lazily created AudioContext. The first call has to happen
/// inside a user gesture or the context stays suspended.
#[derive(Default)]
pub struct WebTone {
    ctx: Option<web::AudioContext>,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| {
        log::error!("GainNode error: {:?}", e);
        js_err(e)
    })?;
    g.gain().set_value(value);
    Ok(g)
}

impl WebTone {
    fn context(&mut self) -> anyhow::Result<web::AudioContext> {
        if let Some(ctx) = &self.ctx {
            return Ok(ctx.clone());
        }
        let ctx = web::AudioContext::new().map_err(|e| {
            log::error!("AudioContext error: {:?}", e);
            js_err(e)
        })?;
        self.ctx = Some(ctx.clone());
        Ok(ctx)
    }

    fn try_play(&mut self, tone: &Tone) -> anyhow::Result<()> {
        let audio_ctx = self.context()?;
        _ = audio_ctx.resume();
        let now = audio_ctx.current_time();

        let src = web::OscillatorNode::new(&audio_ctx).map_err(js_err)?;
        src.set_type(web::OscillatorType::Sine);
        src.frequency()
            .set_value_at_time(tone.frequency_hz, now)
            .map_err(js_err)?;
        let g = create_gain(&audio_ctx, tone.gain)?;

        src.connect_with_audio_node(&g).map_err(js_err)?;
        g.connect_with_audio_node(&audio_ctx.destination())
            .map_err(js_err)?;
        src.start().map_err(js_err)?;
        src.stop_with_when(now + tone.duration_sec).map_err(js_err)?;
        Ok(())
    }
}

impl ToneOutput for WebTone {
    fn is_available(&self) -> bool {
        web::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("AudioContext")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn play_tone(&mut self, tone: &Tone) -> GuideResult<()> {
        self.try_play(tone)
            .map_err(|e| GuideError::AudioUnlock(format!("{e:#}")))
    }
}
