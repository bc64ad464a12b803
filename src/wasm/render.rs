use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

use crate::error::{SlideshowError, SlideshowResult};
use crate::platform::{Layer, Stage};

const FRAME: &str = ".projection-frame";
const LAYER_A: &str = ".slide-a";
const LAYER_B: &str = ".slide-b";
const SURFACE_A: &str = ".slide-a .slide-motion";
const SURFACE_B: &str = ".slide-b .slide-motion";
const COUNTER: &str = "#counter";
const TOGGLE: &str = "#toggle";
const TOGGLE_TEXT: &str = "#toggleText";
const COVER: &str = "#cover";

/// Render surface over the page's projection frame and its two layers.
///
/// Each layer holds an inner surface carrying the image and its motion animation. The layer
/// itself only takes the transition tags and `--trans-dur`.
pub struct DomStage {
    window: Window,
    frame: Element,
    layers: [HtmlElement; 2],
    surfaces: [HtmlElement; 2],
    counter: Option<Element>,
    toggle: Option<Element>,
    toggle_text: Option<Element>,
    cover: Option<Element>,
    narrow_query: String,
}

impl DomStage {
    /// Look up the frame, both layers and their surfaces; counter, toggle and cover are optional.
    pub fn new(window: &Window, document: &Document, narrow_px: u32) -> SlideshowResult<Self> {
        let frame = required(document, FRAME)?;
        let layer_a = html(required(document, LAYER_A)?, LAYER_A)?;
        let layer_b = html(required(document, LAYER_B)?, LAYER_B)?;
        let surface_a = html(required(document, SURFACE_A)?, SURFACE_A)?;
        let surface_b = html(required(document, SURFACE_B)?, SURFACE_B)?;

        Ok(Self {
            window: window.clone(),
            frame,
            layers: [layer_a, layer_b],
            surfaces: [surface_a, surface_b],
            counter: document.query_selector(COUNTER)?,
            toggle: document.query_selector(TOGGLE)?,
            toggle_text: document.query_selector(TOGGLE_TEXT)?,
            cover: document.query_selector(COVER)?,
            narrow_query: format!("(max-width: {narrow_px}px)"),
        })
    }

    fn layer(&self, layer: Layer) -> &HtmlElement {
        &self.layers[layer.slot()]
    }

    fn surface(&self, layer: Layer) -> &HtmlElement {
        &self.surfaces[layer.slot()]
    }
}

fn required(document: &Document, selector: &str) -> SlideshowResult<Element> {
    document
        .query_selector(selector)?
        .ok_or_else(|| SlideshowError::MissingElement(selector.to_owned()))
}

fn html(element: Element, selector: &str) -> SlideshowResult<HtmlElement> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| SlideshowError::MissingElement(format!("{selector} (not an HTML element)")))
}

impl Stage for DomStage {
    fn set_background(&mut self, layer: Layer, url: &str) -> SlideshowResult<()> {
        let value = format!("url(\"{}\")", url.replace('"', "\\\""));
        self.surface(layer)
            .style()
            .set_property("background-image", &value)?;
        Ok(())
    }

    fn restart_animation(
        &mut self,
        layer: Layer,
        animation: &str,
        duration_ms: u32,
    ) -> SlideshowResult<()> {
        let element = self.surface(layer);
        let style = element.style();
        style.set_property("animation-duration", &format!("{duration_ms}ms"))?;
        style.set_property("animation-name", "none")?;
        // Reading layout forces a style flush; without it the same name would not restart.
        let _ = element.offset_height();
        style.set_property("animation-name", animation)?;
        Ok(())
    }

    fn add_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()> {
        self.layer(layer).class_list().add_1(class)?;
        Ok(())
    }

    fn remove_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()> {
        self.layer(layer).class_list().remove_1(class)?;
        Ok(())
    }

    fn set_transition_ms(&mut self, layer: Layer, ms: u32) -> SlideshowResult<()> {
        self.layer(layer)
            .style()
            .set_property("--trans-dur", &format!("{ms}ms"))?;
        Ok(())
    }

    fn set_animations_running(&mut self, running: bool) -> SlideshowResult<()> {
        let state = if running { "running" } else { "paused" };
        for surface in &self.surfaces {
            surface.style().set_property("animation-play-state", state)?;
        }
        Ok(())
    }

    fn set_label(&mut self, text: &str) -> SlideshowResult<()> {
        self.frame.set_attribute("aria-label", text)?;
        Ok(())
    }

    fn set_counter(&mut self, text: &str) -> SlideshowResult<()> {
        if let Some(counter) = &self.counter {
            counter.set_text_content(Some(text));
        }
        Ok(())
    }

    fn set_toggle_state(&mut self, playing: bool) -> SlideshowResult<()> {
        if let Some(toggle) = &self.toggle {
            toggle.set_attribute("aria-pressed", if playing { "true" } else { "false" })?;
            if playing {
                toggle.remove_attribute("data-state")?;
            } else {
                toggle.set_attribute("data-state", "paused")?;
            }
        }
        if let Some(text) = &self.toggle_text {
            text.set_text_content(Some(if playing { "Pause" } else { "Play" }));
        }
        Ok(())
    }

    fn hide_cover(&mut self) -> SlideshowResult<()> {
        if let Some(cover) = &self.cover {
            cover.class_list().add_1("is-hidden")?;
        }
        Ok(())
    }

    fn preload(&mut self, urls: &[String]) -> SlideshowResult<()> {
        for url in urls {
            HtmlImageElement::new()?.set_src(url);
        }
        Ok(())
    }

    fn is_narrow_viewport(&self) -> bool {
        self.window
            .match_media(&self.narrow_query)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}
