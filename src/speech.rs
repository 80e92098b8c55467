use cicerone_core::{GuideError, GuideResult, SpeechOutput, Utterance, UtteranceToken};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub type EndSink = Rc<dyn Fn(UtteranceToken)>;

struct Live {
    utterance: web::SpeechSynthesisUtterance,
    _on_end: Closure<dyn FnMut()>,
}

impl Live {
    // canceled utterances may still fire end/error later; nothing may call
    // into the dropped closure
    fn detach(&self) {
        self.utterance.set_onend(None);
        self.utterance.set_onerror(None);
    }
}

/// `window.speechSynthesis` behind [`SpeechOutput`].
pub struct WebSpeech {
    on_end: EndSink,
    live: Option<Live>,
}

impl WebSpeech {
    pub fn new(on_end: EndSink) -> Self {
        Self { on_end, live: None }
    }

    fn synth() -> Option<web::SpeechSynthesis> {
        let w = web::window()?;
        if !js_sys::Reflect::has(&w, &JsValue::from_str("speechSynthesis")).unwrap_or(false) {
            return None;
        }
        w.speech_synthesis().ok()
    }

    fn drop_live(&mut self) {
        if let Some(live) = self.live.take() {
            live.detach();
        }
    }
}

impl SpeechOutput for WebSpeech {
    fn is_supported(&self) -> bool {
        Self::synth().is_some()
    }

    fn speak(&mut self, utterance: &Utterance) -> GuideResult<()> {
        let synth = Self::synth().ok_or(GuideError::SpeechUnsupported)?;
        let utt = web::SpeechSynthesisUtterance::new_with_text(&utterance.text).map_err(|e| {
            log::error!("SpeechSynthesisUtterance error: {:?}", e);
            GuideError::SpeechUnsupported
        })?;
        utt.set_lang(utterance.lang);
        utt.set_rate(utterance.rate);

        let on_end = self.on_end.clone();
        let token = utterance.token;
        let closure = Closure::wrap(Box::new(move || on_end(token)) as Box<dyn FnMut()>);
        utt.set_onend(Some(closure.as_ref().unchecked_ref()));
        utt.set_onerror(Some(closure.as_ref().unchecked_ref()));

        self.drop_live();
        synth.speak(&utt);
        self.live = Some(Live {
            utterance: utt,
            _on_end: closure,
        });
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.drop_live();
        if let Some(synth) = Self::synth() {
            synth.cancel();
        }
    }
}
