//! Dual-layer presentation: one layer is visible, the other receives the next image and
//! is swapped in with a transition.

use crate::error::SlideshowResult;
use crate::platform::{Layer, Runtime, Stage, Task, TimerHandle};
use crate::style::{MotionStyle, Transition};

pub const ACTIVE_CLASS: &str = "is-active";
pub const ENTER_CLASS: &str = "enter";
pub const EXIT_CLASS: &str = "exit";

/// What the presenter believes each layer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerState {
    pub image: Option<String>,
    pub active: bool,
    pub motion: Option<MotionStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Swap {
    generation: u64,
    incoming: Layer,
    outgoing: Layer,
    transition: Transition,
}

#[derive(Debug)]
pub struct Presenter {
    front: Layer,
    layers: [LayerState; 2],
    generation: u64,
    swap: Option<Swap>,
    flip_pending: bool,
    cleanup_timer: Option<TimerHandle>,
    slide_ms: u32,
    fade_ms: u32,
    cleanup_margin_ms: u32,
}

impl Presenter {
    pub fn new(slide_ms: u32, fade_ms: u32, cleanup_margin_ms: u32) -> Self {
        Self {
            front: Layer::A,
            layers: [LayerState::default(), LayerState::default()],
            generation: 0,
            swap: None,
            flip_pending: false,
            cleanup_timer: None,
            slide_ms,
            fade_ms,
            cleanup_margin_ms,
        }
    }

    /// Layer that shows (or is about to show) the current slide.
    pub fn front(&self) -> Layer {
        self.front
    }

    pub fn layer(&self, layer: Layer) -> &LayerState {
        &self.layers[layer.slot()]
    }

    /// True between `advance` and the frame that swaps the active flag.
    pub fn is_flip_pending(&self) -> bool {
        self.flip_pending
    }

    /// True while transient transition tags may still be present.
    pub fn is_transitioning(&self) -> bool {
        self.swap.is_some()
    }

    /// Load `url` on `layer` and restart its motion for a full slide duration.
    pub fn set_image<S: Stage>(
        &mut self,
        stage: &mut S,
        layer: Layer,
        url: &str,
        motion: MotionStyle,
    ) -> SlideshowResult<()> {
        stage.set_background(layer, url)?;
        stage.restart_animation(layer, motion.animation_name(), self.slide_ms)?;
        let state = &mut self.layers[layer.slot()];
        state.image = Some(url.to_owned());
        state.motion = Some(motion);
        Ok(())
    }

    /// Hard cut to `url` on layer A, with no transition. Used for the first slide and after
    /// every loop boundary.
    pub fn show_initial<S: Stage, R: Runtime>(
        &mut self,
        stage: &mut S,
        runtime: &mut R,
        url: &str,
        motion: MotionStyle,
        total: usize,
    ) -> SlideshowResult<()> {
        self.abandon_swap(stage, runtime)?;
        self.set_image(stage, Layer::A, url, motion)?;
        self.set_active(stage, Layer::A, true)?;
        self.set_active(stage, Layer::B, false)?;
        self.front = Layer::A;
        announce(stage, 1, total)
    }

    /// Swap `url` in on the back layer with `transition`.
    ///
    /// The active flag moves on the next frame so the pre-transition state gets painted first.
    /// Transient tags are removed once the transition and the cleanup margin have elapsed.
    #[allow(clippy::too_many_arguments)]
    pub fn advance<S: Stage, R: Runtime>(
        &mut self,
        stage: &mut S,
        runtime: &mut R,
        url: &str,
        position: usize,
        total: usize,
        transition: Transition,
        motion: MotionStyle,
    ) -> SlideshowResult<()> {
        self.abandon_swap(stage, runtime)?;

        let outgoing = self.front;
        let incoming = outgoing.other();
        self.generation += 1;
        let generation = self.generation;

        stage.add_class(incoming, ENTER_CLASS)?;
        stage.add_class(incoming, transition.class())?;
        stage.add_class(outgoing, EXIT_CLASS)?;
        stage.add_class(outgoing, transition.class())?;
        stage.set_transition_ms(incoming, self.fade_ms)?;
        stage.set_transition_ms(outgoing, self.fade_ms)?;

        self.set_image(stage, incoming, url, motion)?;
        // incoming must start hidden so the enter animation has something to animate from
        self.set_active(stage, incoming, false)?;

        self.swap = Some(Swap {
            generation,
            incoming,
            outgoing,
            transition,
        });
        self.flip_pending = true;
        runtime.next_frame(Task::Flip { generation })?;
        let delay = f64::from(self.fade_ms) + f64::from(self.cleanup_margin_ms);
        self.cleanup_timer = Some(runtime.set_timeout(delay, Task::Cleanup { generation })?);

        self.front = incoming;
        announce(stage, position, total)
    }

    /// Move the active flag from the outgoing to the incoming layer. Stale generations are ignored.
    pub fn flip<S: Stage>(&mut self, stage: &mut S, generation: u64) -> SlideshowResult<()> {
        let Some(swap) = self.swap.filter(|s| s.generation == generation) else {
            return Ok(());
        };
        if !self.flip_pending {
            return Ok(());
        }
        self.flip_pending = false;
        self.set_active(stage, swap.incoming, true)?;
        self.set_active(stage, swap.outgoing, false)
    }

    /// Strip the transient tags of a finished swap. Idempotent.
    pub fn cleanup<S: Stage>(&mut self, stage: &mut S, generation: u64) -> SlideshowResult<()> {
        let Some(swap) = self.swap.filter(|s| s.generation == generation) else {
            return Ok(());
        };
        self.cleanup_timer = None;
        if self.flip_pending {
            self.flip(stage, generation)?;
        }
        self.swap = None;
        clear_transient(stage, swap.incoming)?;
        clear_transient(stage, swap.outgoing)
    }

    /// Settle a swap that is still in flight so the next one starts from clean layers.
    fn abandon_swap<S: Stage, R: Runtime>(
        &mut self,
        stage: &mut S,
        runtime: &mut R,
    ) -> SlideshowResult<()> {
        if let Some(handle) = self.cleanup_timer.take() {
            runtime.clear_timeout(handle);
        }
        if let Some(swap) = self.swap {
            self.cleanup(stage, swap.generation)?;
        }
        Ok(())
    }

    fn set_active<S: Stage>(
        &mut self,
        stage: &mut S,
        layer: Layer,
        active: bool,
    ) -> SlideshowResult<()> {
        if active {
            stage.add_class(layer, ACTIVE_CLASS)?;
        } else {
            stage.remove_class(layer, ACTIVE_CLASS)?;
        }
        self.layers[layer.slot()].active = active;
        Ok(())
    }
}

fn clear_transient<S: Stage>(stage: &mut S, layer: Layer) -> SlideshowResult<()> {
    stage.remove_class(layer, ENTER_CLASS)?;
    stage.remove_class(layer, EXIT_CLASS)?;
    for transition in Transition::ALL {
        stage.remove_class(layer, transition.class())?;
    }
    Ok(())
}

fn announce<S: Stage>(stage: &mut S, position: usize, total: usize) -> SlideshowResult<()> {
    stage.set_label(&format!("Slide {position}"))?;
    stage.set_counter(&format!("{position} / {total}"))
}
