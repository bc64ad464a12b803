#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Looping image slideshow for the browser: shuffled playlist, weighted random transitions,
//! slow zoom/pan motion per slide and pausable wall-clock timing.
//!
//! The core is platform independent and talks to the page through the traits in
//! [`platform`]; the `wasm` module binds those traits to the DOM.

pub mod logging;

pub mod config;
pub mod controller;
pub mod error;
pub mod platform;
pub mod presenter;
pub mod scheduler;
pub mod sequencer;
pub mod site;
pub mod style;

pub use config::{LoopMode, SlideshowConfig};
pub use controller::Slideshow;
pub use error::{SlideshowError, SlideshowResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::render::DomStage;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element};

    use crate::error::SlideshowResult;
    use crate::{console_error, console_warn, logging, Slideshow, SlideshowConfig};

    mod audio;
    pub(crate) mod render;
    mod runtime;

    pub(crate) type BrowserShow =
        Slideshow<render::DomStage, runtime::BrowserRuntime, audio::HtmlAudioSink>;

    const CONFIG_ELEMENT: &str = "slideshow-config";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logging::init_logging();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let Some(config_element) = document.get_element_by_id(CONFIG_ELEMENT) else {
            console_warn!("#{CONFIG_ELEMENT} not found; slideshow disabled");
            return Ok(());
        };
        let config = read_config(&config_element)?;
        let stage = render::DomStage::new(&window, &document, config.narrow_breakpoint_px)?;
        let audio = audio::HtmlAudioSink::find(&document);
        let performance = window.performance().ok_or("performance API unavailable")?;

        let show: Rc<RefCell<BrowserShow>> = Rc::new_cyclic(|weak| {
            let runtime = runtime::BrowserRuntime::new(window.clone(), performance, weak.clone());
            RefCell::new(Slideshow::new(config, stage, runtime, audio))
        });
        show.borrow_mut().init()?;

        // Do not auto-start: playback waits for the cover gesture so audio may play.
        on_click(&document, "toggle", &show, BrowserShow::toggle)?;
        on_click(&document, "openBtn", &show, BrowserShow::open_cover)?;
        Ok(())
    }

    fn read_config(element: &Element) -> SlideshowResult<SlideshowConfig> {
        let json = element.text_content().unwrap_or_default();
        SlideshowConfig::from_json(&json)
    }

    fn on_click(
        document: &Document,
        id: &str,
        show: &Rc<RefCell<BrowserShow>>,
        action: fn(&mut BrowserShow) -> SlideshowResult<()>,
    ) -> Result<(), JsValue> {
        let Some(target) = document.get_element_by_id(id) else {
            console_warn!("#{id} not found; control disabled");
            return Ok(());
        };

        let show = Rc::clone(show);
        let handler = Closure::wrap(Box::new(move || {
            let result = match show.try_borrow_mut() {
                Ok(mut show) => action(&mut show),
                Err(_) => return,
            };
            if let Err(err) = result {
                console_error!("slideshow control failed: {err}");
            }
        }) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
        Ok(())
    }
}
