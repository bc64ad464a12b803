#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};

use slideshow_wasm::platform::{AudioSink, Layer, Runtime, Stage, Task, TimerHandle};
use slideshow_wasm::{Slideshow, SlideshowConfig, SlideshowError, SlideshowResult};

pub type TestShow = Slideshow<FakeStage, FakeRuntime, FakeAudio>;

fn idx(layer: Layer) -> usize {
    match layer {
        Layer::A => 0,
        Layer::B => 1,
    }
}

/// Records everything the presenter asks of the page.
#[derive(Debug, Default)]
pub struct FakeStage {
    pub backgrounds: [Option<String>; 2],
    pub animations: Vec<(Layer, String, u32)>,
    pub classes: [BTreeSet<String>; 2],
    pub added: Vec<(Layer, String)>,
    pub transition_ms: [Option<u32>; 2],
    pub running: Option<bool>,
    pub label: String,
    pub counter: String,
    pub toggle_playing: Option<bool>,
    pub cover_hidden: bool,
    pub preloaded: Vec<String>,
    pub narrow: bool,
    /// Number of upcoming `set_background` calls that fail.
    pub failing_backgrounds: usize,
}

impl FakeStage {
    pub fn has(&self, layer: Layer, class: &str) -> bool {
        self.classes[idx(layer)].contains(class)
    }

    pub fn is_active(&self, layer: Layer) -> bool {
        self.has(layer, "is-active")
    }

    /// Tags other than the active flag.
    pub fn transient(&self, layer: Layer) -> Vec<String> {
        self.classes[idx(layer)]
            .iter()
            .filter(|c| c.as_str() != "is-active")
            .cloned()
            .collect()
    }

    pub fn ever_added(&self, class: &str) -> bool {
        self.added.iter().any(|(_, c)| c == class)
    }
}

impl Stage for FakeStage {
    fn set_background(&mut self, layer: Layer, url: &str) -> SlideshowResult<()> {
        if self.failing_backgrounds > 0 {
            self.failing_backgrounds -= 1;
            return Err(SlideshowError::JavaScript("image decode failed".into()));
        }
        self.backgrounds[idx(layer)] = Some(url.to_owned());
        Ok(())
    }

    fn restart_animation(
        &mut self,
        layer: Layer,
        animation: &str,
        duration_ms: u32,
    ) -> SlideshowResult<()> {
        self.animations
            .push((layer, animation.to_owned(), duration_ms));
        Ok(())
    }

    fn add_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()> {
        self.classes[idx(layer)].insert(class.to_owned());
        self.added.push((layer, class.to_owned()));
        Ok(())
    }

    fn remove_class(&mut self, layer: Layer, class: &str) -> SlideshowResult<()> {
        self.classes[idx(layer)].remove(class);
        Ok(())
    }

    fn set_transition_ms(&mut self, layer: Layer, ms: u32) -> SlideshowResult<()> {
        self.transition_ms[idx(layer)] = Some(ms);
        Ok(())
    }

    fn set_animations_running(&mut self, running: bool) -> SlideshowResult<()> {
        self.running = Some(running);
        Ok(())
    }

    fn set_label(&mut self, text: &str) -> SlideshowResult<()> {
        self.label = text.to_owned();
        Ok(())
    }

    fn set_counter(&mut self, text: &str) -> SlideshowResult<()> {
        self.counter = text.to_owned();
        Ok(())
    }

    fn set_toggle_state(&mut self, playing: bool) -> SlideshowResult<()> {
        self.toggle_playing = Some(playing);
        Ok(())
    }

    fn hide_cover(&mut self) -> SlideshowResult<()> {
        self.cover_hidden = true;
        Ok(())
    }

    fn preload(&mut self, urls: &[String]) -> SlideshowResult<()> {
        self.preloaded.extend(urls.iter().cloned());
        Ok(())
    }

    fn is_narrow_viewport(&self) -> bool {
        self.narrow
    }
}

/// Virtual clock; timers only fire when a test drives time forward.
#[derive(Debug, Default)]
pub struct FakeRuntime {
    pub now: f64,
    next_id: i32,
    /// Outstanding timers: handle, absolute due time, task.
    pub timers: Vec<(TimerHandle, f64, Task)>,
    pub frames: VecDeque<Task>,
    /// Every timeout ever requested: armed at, delay, task.
    pub armed: Vec<(f64, f64, Task)>,
}

impl FakeRuntime {
    pub fn pending(&self, task: Task) -> Vec<f64> {
        self.timers
            .iter()
            .filter(|(_, _, t)| *t == task)
            .map(|(_, due, _)| *due)
            .collect()
    }

    /// Due time of the outstanding `Advance`, if any.
    pub fn advance_due(&self) -> Option<f64> {
        self.pending(Task::Advance).first().copied()
    }

    fn earliest_before(&self, until: f64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, (_, due, _))| *due <= until)
            .min_by(|(_, (ha, a, _)), (_, (hb, b, _))| a.total_cmp(b).then(ha.0.cmp(&hb.0)))
            .map(|(pos, _)| pos)
    }
}

impl Runtime for FakeRuntime {
    fn now(&self) -> f64 {
        self.now
    }

    fn set_timeout(&mut self, delay_ms: f64, task: Task) -> SlideshowResult<TimerHandle> {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push((handle, self.now + delay_ms, task));
        self.armed.push((self.now, delay_ms, task));
        Ok(handle)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _, _)| *h != handle);
    }

    fn next_frame(&mut self, task: Task) -> SlideshowResult<()> {
        self.frames.push_back(task);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeAudio {
    pub plays: usize,
    pub pauses: usize,
    pub rewinds: usize,
    pub fail: bool,
}

impl FakeAudio {
    fn outcome(&self) -> SlideshowResult<()> {
        if self.fail {
            Err(SlideshowError::JavaScript("NotAllowedError".into()))
        } else {
            Ok(())
        }
    }
}

impl AudioSink for FakeAudio {
    fn play(&mut self) -> SlideshowResult<()> {
        self.plays += 1;
        self.outcome()
    }

    fn pause(&mut self) -> SlideshowResult<()> {
        self.pauses += 1;
        self.outcome()
    }

    fn rewind(&mut self) -> SlideshowResult<()> {
        self.rewinds += 1;
        self.outcome()
    }
}

pub fn slides(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("images/{i:02}.jpg")).collect()
}

pub fn config(count: usize, total_show_ms: u32) -> SlideshowConfig {
    SlideshowConfig {
        slides: slides(count),
        total_show_ms,
        seed: Some(7),
        ..SlideshowConfig::default()
    }
}

pub fn show(config: SlideshowConfig) -> TestShow {
    show_with(config, FakeStage::default(), FakeAudio::default())
}

pub fn show_with(config: SlideshowConfig, stage: FakeStage, audio: FakeAudio) -> TestShow {
    let mut show = Slideshow::new(config, stage, FakeRuntime::default(), audio);
    show.init().unwrap();
    show
}

/// Run every frame and timer due up to `until`, in due order, then park the clock there.
pub fn run_until(show: &mut TestShow, until: f64) {
    loop {
        if let Some(task) = show.runtime_mut().frames.pop_front() {
            show.run(task).unwrap();
            continue;
        }
        let Some(pos) = show.runtime().earliest_before(until) else {
            break;
        };
        let runtime = show.runtime_mut();
        let (_, due, task) = runtime.timers.remove(pos);
        runtime.now = runtime.now.max(due);
        show.run(task).unwrap();
    }
    let runtime = show.runtime_mut();
    runtime.now = runtime.now.max(until);
}

/// Fire the outstanding `Advance` without running the frame it queues.
pub fn fire_advance(show: &mut TestShow) {
    try_fire_advance(show).unwrap();
}

pub fn try_fire_advance(show: &mut TestShow) -> SlideshowResult<()> {
    let runtime = show.runtime_mut();
    let pos = runtime
        .timers
        .iter()
        .position(|(_, _, t)| *t == Task::Advance)
        .expect("no advance armed");
    let (_, due, task) = runtime.timers.remove(pos);
    runtime.now = due;
    show.run(task)
}
