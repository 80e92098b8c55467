use cicerone_core::{
    Geolocation, GuideError, GuideResult, PollHandle, Position, SessionId, WatchHandle,
    WatchOptions, DRIVING_TIMEOUT,
};
use crate::retired::Retired;
use fnv::FnvHashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// What a subscription delivered.
pub enum Fix {
    Sample(Position),
    Error(String),
}

pub type FixSink = Rc<dyn Fn(SessionId, Fix)>;

struct Callbacks {
    success: Closure<dyn FnMut(JsValue)>,
    error: Closure<dyn FnMut(JsValue)>,
}

impl Callbacks {
    fn new(sink: &FixSink, session: SessionId) -> Self {
        let on_sample = sink.clone();
        let success = Closure::wrap(Box::new(move |value: JsValue| {
            let pos: web::GeolocationPosition = value.unchecked_into();
            let coords = pos.coords();
            on_sample(
                session,
                Fix::Sample(Position::new(coords.latitude(), coords.longitude())),
            );
        }) as Box<dyn FnMut(JsValue)>);

        let on_error = sink.clone();
        let error = Closure::wrap(Box::new(move |value: JsValue| {
            let message = value
                .dyn_ref::<web::GeolocationPositionError>()
                .map(|e| e.message())
                .unwrap_or_else(|| format!("{:?}", value));
            on_error(session, Fix::Error(message));
        }) as Box<dyn FnMut(JsValue)>);

        Self { success, error }
    }

    fn success_fn(&self) -> &js_sys::Function {
        self.success.as_ref().unchecked_ref()
    }

    fn error_fn(&self) -> &js_sys::Function {
        self.error.as_ref().unchecked_ref()
    }
}

struct Poller {
    callbacks: Callbacks,
    _tick: Closure<dyn FnMut()>,
}

/// `navigator.geolocation` plus `setInterval` polling.
pub struct WebGeolocation {
    sink: FixSink,
    current: Option<SessionId>,
    watches: FnvHashMap<i32, Callbacks>,
    polls: FnvHashMap<i32, Poller>,
    // poll callbacks whose last getCurrentPosition may still be in flight
    retired: Retired<Callbacks>,
}

fn js_err(e: JsValue) -> GuideError {
    GuideError::GeolocationUnavailable(format!("{:?}", e))
}

fn api() -> Option<web::Geolocation> {
    let navigator = web::window()?.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return None;
    }
    navigator.geolocation().ok()
}

fn position_options(options: &WatchOptions) -> web::PositionOptions {
    let opts = web::PositionOptions::new();
    opts.set_enable_high_accuracy(options.high_accuracy);
    opts.set_maximum_age(options.maximum_age.as_millis() as u32);
    opts.set_timeout(options.timeout.as_millis() as u32);
    opts
}

impl WebGeolocation {
    pub fn new(sink: FixSink) -> Self {
        Self {
            sink,
            current: None,
            watches: FnvHashMap::default(),
            polls: FnvHashMap::default(),
            retired: Retired::new(2.0 * DRIVING_TIMEOUT.as_millis() as f64),
        }
    }

    /// Drop retired poll callbacks once a sample from the current session
    /// shows the switch has settled and their requests have timed out.
    pub fn prune_retired(&mut self, session: SessionId) {
        if self.current != Some(session) || self.retired.is_empty() {
            return;
        }
        let released = self.retired.prune(js_sys::Date::now());
        if released > 0 {
            log::debug!("[geo] released {} retired poll callbacks", released);
        }
    }
}

impl Geolocation for WebGeolocation {
    fn is_available(&self) -> bool {
        api().is_some()
    }

    fn watch(&mut self, session: SessionId, options: &WatchOptions) -> GuideResult<WatchHandle> {
        let geo = api().ok_or_else(|| {
            GuideError::GeolocationUnavailable("navigator.geolocation missing".into())
        })?;
        let callbacks = Callbacks::new(&self.sink, session);
        self.current = Some(session);
        let id = geo
            .watch_position_with_error_callback_and_options(
                callbacks.success_fn(),
                Some(callbacks.error_fn()),
                &position_options(options),
            )
            .map_err(js_err)?;
        self.watches.insert(id, callbacks);
        Ok(WatchHandle(id))
    }

    fn start_polling(
        &mut self,
        session: SessionId,
        interval: Duration,
        options: &WatchOptions,
    ) -> GuideResult<PollHandle> {
        let window = web::window().ok_or_else(|| js_err(JsValue::from_str("no window")))?;
        let geo = api().ok_or_else(|| {
            GuideError::GeolocationUnavailable("navigator.geolocation missing".into())
        })?;
        let callbacks = Callbacks::new(&self.sink, session);
        let success = callbacks.success_fn().clone();
        let error = callbacks.error_fn().clone();
        let opts = position_options(options);
        let tick = Closure::wrap(Box::new(move || {
            _ = geo.get_current_position_with_error_callback_and_options(
                &success,
                Some(&error),
                &opts,
            );
        }) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                interval.as_millis() as i32,
            )
            .map_err(js_err)?;
        self.polls.insert(
            id,
            Poller {
                callbacks,
                _tick: tick,
            },
        );
        Ok(PollHandle(id))
    }

    fn clear_watch(&mut self, handle: WatchHandle) {
        if let Some(geo) = api() {
            geo.clear_watch(handle.0);
        }
        self.watches.remove(&handle.0);
    }

    fn stop_polling(&mut self, handle: PollHandle) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(handle.0);
        }
        if let Some(poller) = self.polls.remove(&handle.0) {
            // the tracker drops whatever the retired callbacks still deliver
            self.retired.retire(poller.callbacks, js_sys::Date::now());
        }
    }
}
