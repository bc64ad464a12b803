//! Seams between the slideshow core and whatever hosts it.
//!
//! The browser build implements these over the DOM and `window` timers; tests implement them
//! over a virtual clock.

use crate::error::SlideshowResult;

/// One of the two alternating render surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    A,
    B,
}

impl Layer {
    pub fn other(self) -> Layer {
        match self {
            Layer::A => Layer::B,
            Layer::B => Layer::A,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Layer::A => 0,
            Layer::B => 1,
        }
    }
}

/// Deferred work handed to a [`Runtime`]. Generations identify the swap a presenter task
/// belongs to; a task whose generation is no longer current is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Advance,
    Finish,
    Flip { generation: u64 },
    Cleanup { generation: u64 },
}

/// Opaque id of an armed timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Clock and task scheduling.
pub trait Runtime {
    /// Monotonic milliseconds.
    fn now(&self) -> f64;

    fn set_timeout(&mut self, delay_ms: f64, task: Task) -> SlideshowResult<TimerHandle>;

    /// Cancelling an already fired or unknown handle is harmless.
    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Run `task` on the next rendering frame.
    fn next_frame(&mut self, task: Task) -> SlideshowResult<()>;
}

/// Two layers plus the page chrome around them.
pub trait Stage {
    fn set_background(&mut self, layer: Layer, url: &str) -> SlideshowResult<()>;

    /// Restart the motion animation from its first keyframe, even if `animation` is unchanged.
    fn restart_animation(
        &mut self,
        layer: Layer,
        animation: &str,
        duration_ms: u32,
    ) -> SlideshowResult<()>;

    fn add_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()>;

    fn remove_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()>;

    /// Sets the `--trans-dur` custom property.
    fn set_transition_ms(&mut self, layer: Layer, ms: u32) -> SlideshowResult<()>;

    /// Run or freeze the motion animation on both layers.
    fn set_animations_running(&mut self, running: bool) -> SlideshowResult<()>;

    /// Accessible label ("Slide N").
    fn set_label(&mut self, text: &str) -> SlideshowResult<()>;

    /// Visible counter ("N / total").
    fn set_counter(&mut self, text: &str) -> SlideshowResult<()>;

    /// Pressed state and label of the play/pause control.
    fn set_toggle_state(&mut self, playing: bool) -> SlideshowResult<()>;

    fn hide_cover(&mut self) -> SlideshowResult<()>;

    fn preload(&mut self, _urls: &[String]) -> SlideshowResult<()> {
        Ok(())
    }

    fn is_narrow_viewport(&self) -> bool;
}

/// Background music. Every call is best effort.
pub trait AudioSink {
    fn play(&mut self) -> SlideshowResult<()>;

    fn pause(&mut self) -> SlideshowResult<()>;

    /// Seek back to the start of the track.
    fn rewind(&mut self) -> SlideshowResult<()>;
}

/// Audio sink for pages without music.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self) -> SlideshowResult<()> {
        Ok(())
    }

    fn pause(&mut self) -> SlideshowResult<()> {
        Ok(())
    }

    fn rewind(&mut self) -> SlideshowResult<()> {
        Ok(())
    }
}
