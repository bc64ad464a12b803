use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAudioElement};

use crate::console_debug;
use crate::error::SlideshowResult;
use crate::platform::AudioSink;

const AUDIO_ELEMENT: &str = "bgAudio";

/// Background track in an `<audio>` element; a page without one plays silently.
pub struct HtmlAudioSink {
    element: Option<HtmlAudioElement>,
}

impl HtmlAudioSink {
    pub fn find(document: &Document) -> Self {
        let element = document
            .get_element_by_id(AUDIO_ELEMENT)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        Self { element }
    }
}

impl AudioSink for HtmlAudioSink {
    fn play(&mut self) -> SlideshowResult<()> {
        let Some(audio) = &self.element else {
            return Ok(());
        };
        let promise: js_sys::Promise = audio.play()?;
        // Autoplay policy rejects asynchronously; the slides keep going without sound.
        let on_reject = Closure::once(move |err: JsValue| {
            console_debug!("slideshow: audio playback rejected: {err:?}");
        });
        let _ = promise.catch(&on_reject);
        on_reject.forget();
        Ok(())
    }

    fn pause(&mut self) -> SlideshowResult<()> {
        if let Some(audio) = &self.element {
            audio.pause()?;
        }
        Ok(())
    }

    fn rewind(&mut self) -> SlideshowResult<()> {
        if let Some(audio) = &self.element {
            audio.set_current_time(0.0);
        }
        Ok(())
    }
}
