//! Playback controller: owns the sequencer, pickers, presenter and scheduler and drives them
//! from the tasks its [`Runtime`] hands back.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{LoopMode, SlideshowConfig};
use crate::error::SlideshowResult;
use crate::platform::{AudioSink, Runtime, Stage, Task};
use crate::presenter::Presenter;
use crate::scheduler::{Phase, Scheduler};
use crate::sequencer::{Sequencer, Step};
use crate::style::{MotionPicker, TransitionPicker};
use crate::{console_debug, console_log};

pub struct Slideshow<S, R, A> {
    sequencer: Sequencer,
    transitions: TransitionPicker,
    motions: MotionPicker,
    presenter: Presenter,
    scheduler: Scheduler,
    loop_mode: LoopMode,
    slide_ms: u32,
    cover_open: bool,
    rng: ChaCha8Rng,
    stage: S,
    runtime: R,
    audio: A,
}

impl<S: Stage, R: Runtime, A: AudioSink> Slideshow<S, R, A> {
    pub fn new(config: SlideshowConfig, stage: S, runtime: R, audio: A) -> Self {
        let slide_ms = config.slide_ms();
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut sequencer = Sequencer::new(config.slides);
        if config.shuffle_on_start {
            sequencer.reshuffle(&mut rng);
        }

        Self {
            sequencer,
            transitions: TransitionPicker::new(config.transitions, config.history_len),
            motions: MotionPicker::new(),
            presenter: Presenter::new(slide_ms, config.fade_ms, config.cleanup_margin_ms),
            scheduler: Scheduler::new(slide_ms, config.fade_ms),
            loop_mode: config.loop_mode,
            slide_ms,
            cover_open: false,
            rng,
            stage,
            runtime,
            audio,
        }
    }

    /// Preload every image, show the first slide and present the paused state.
    pub fn init(&mut self) -> SlideshowResult<()> {
        if self.sequencer.is_empty() {
            return Ok(());
        }
        console_log!(
            "slideshow: {} slides, {}ms each",
            self.sequencer.len(),
            self.slide_ms
        );
        self.stage.preload(self.sequencer.slides())?;
        self.show_first()?;
        self.scheduler.pause(&mut self.runtime);
        self.stage.set_toggle_state(false)?;
        self.stage.set_animations_running(false)
    }

    /// Begin or resume playback. No-op while already armed or with an empty playlist.
    pub fn start(&mut self) -> SlideshowResult<()> {
        if self.sequencer.is_empty() {
            return Ok(());
        }
        if !self.scheduler.resume(&mut self.runtime)? {
            return Ok(());
        }
        console_debug!("slideshow: playing, {}ms left", self.scheduler.remaining_ms());
        self.stage.set_toggle_state(true)?;
        self.stage.set_animations_running(true)?;
        best_effort("play", self.audio.play());
        Ok(())
    }

    /// Pause playback, remembering how much of the current slide is left.
    pub fn stop(&mut self) -> SlideshowResult<()> {
        if self.sequencer.is_empty() {
            return Ok(());
        }
        self.scheduler.pause(&mut self.runtime);
        console_debug!("slideshow: paused, {}ms left", self.scheduler.remaining_ms());
        self.stage.set_toggle_state(false)?;
        self.stage.set_animations_running(false)?;
        best_effort("pause", self.audio.pause());
        Ok(())
    }

    pub fn toggle(&mut self) -> SlideshowResult<()> {
        if self.scheduler.is_playing() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Dismiss the cover and start music and slides. Only the first call has any effect.
    pub fn open_cover(&mut self) -> SlideshowResult<()> {
        if self.cover_open {
            return Ok(());
        }
        self.cover_open = true;
        self.stage.hide_cover()?;
        best_effort("rewind", self.audio.rewind());
        best_effort("play", self.audio.play());
        self.start()
    }

    /// Execute a task previously handed to the runtime.
    pub fn run(&mut self, task: Task) -> SlideshowResult<()> {
        match task {
            Task::Advance => {
                if !self.scheduler.fired() {
                    return Ok(());
                }
                // a failed swap must not leave the show playing with nothing armed
                let swapped = self.advance();
                let slide_ms = f64::from(self.slide_ms);
                if self.loop_mode == LoopMode::Once && self.sequencer.is_last() {
                    self.scheduler.schedule_finish(&mut self.runtime, slide_ms)?;
                } else {
                    self.scheduler.schedule_next(&mut self.runtime, slide_ms)?;
                }
                swapped
            }
            Task::Finish => {
                if !self.scheduler.fired() {
                    return Ok(());
                }
                console_log!("slideshow: pass finished");
                self.stop()
            }
            Task::Flip { generation } => self.presenter.flip(&mut self.stage, generation),
            Task::Cleanup { generation } => self.presenter.cleanup(&mut self.stage, generation),
        }
    }

    fn advance(&mut self) -> SlideshowResult<()> {
        let Some(step) = self.sequencer.advance(&mut self.rng) else {
            return Ok(());
        };
        match step {
            Step::Looped => {
                console_log!("slideshow: loop complete, reshuffled");
                self.show_first()
            }
            Step::Next(index) => {
                let url = self.sequencer.slides()[index].clone();
                let narrow = self.stage.is_narrow_viewport();
                let transition = self.transitions.pick(narrow, &mut self.rng);
                let motion = self.motions.pick(&mut self.rng);
                console_debug!(
                    "slideshow: slide {} via {}",
                    self.sequencer.position(),
                    transition.name()
                );
                self.presenter.advance(
                    &mut self.stage,
                    &mut self.runtime,
                    &url,
                    self.sequencer.position(),
                    self.sequencer.len(),
                    transition,
                    motion,
                )
            }
        }
    }

    fn show_first(&mut self) -> SlideshowResult<()> {
        let Some(url) = self.sequencer.current().map(str::to_owned) else {
            return Ok(());
        };
        let motion = self.motions.pick(&mut self.rng);
        self.presenter.show_initial(
            &mut self.stage,
            &mut self.runtime,
            &url,
            motion,
            self.sequencer.len(),
        )
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn slide_ms(&self) -> u32 {
        self.slide_ms
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn transitions(&self) -> &TransitionPicker {
        &self.transitions
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

/// Audio never interrupts the slides; failures are only logged.
fn best_effort(action: &str, result: SlideshowResult<()>) {
    if let Err(err) = result {
        console_debug!("slideshow: audio {action} ignored: {err}");
    }
}
