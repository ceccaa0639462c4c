use crate::prefs::PreferenceStore;
use crate::schedule::{FrameTask, Scheduler, Task};
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// `setTimeout` and `requestAnimationFrame`.
#[derive(Debug, Clone)]
pub struct BrowserScheduler(web_sys::Window);

impl BrowserScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self(window)
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .0
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            warn!("setTimeout failed: {:?}", e);
        }
    }

    fn request_frame(&self, task: FrameTask) {
        let callback = Closure::once_into_js(move |timestamp: f64| task(timestamp));
        if let Err(e) = self.0.request_animation_frame(callback.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// `localStorage`. Private browsing or a disabled store degrades to no
/// persistence.
#[derive(Debug, Clone)]
pub struct LocalStore(Option<web_sys::Storage>);

impl LocalStore {
    pub fn new(window: &web_sys::Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            warn!("localStorage unavailable, preferences will not persist");
        }
        Self(storage)
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            if let Err(e) = storage.set_item(key, value) {
                debug!("localStorage write of {} failed: {:?}", key, e);
            }
        }
    }
}
