//! Wall-clock anchored slide timer with pause/resume.
//!
//! At most one timer is outstanding: arming always cancels the previous one first. The due
//! timestamp marks the nominal end of the slide; `Advance` fires `fade_ms` earlier so the
//! transition finishes near the boundary instead of after it.

use crate::error::SlideshowResult;
use crate::platform::{Runtime, Task, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never started or paused; only an uninitialised or empty show stays here.
    Idle,
    /// A timer is outstanding.
    Armed,
    /// Stopped, remembering how much of the slide was left.
    Paused,
}

#[derive(Debug)]
pub struct Scheduler {
    timer: Option<TimerHandle>,
    next_task: Task,
    due_at: f64,
    remaining_ms: f64,
    playing: bool,
    started: bool,
    fade_ms: f64,
}

impl Scheduler {
    pub fn new(slide_ms: u32, fade_ms: u32) -> Self {
        Self {
            timer: None,
            next_task: Task::Advance,
            due_at: 0.0,
            remaining_ms: f64::from(slide_ms),
            playing: false,
            started: false,
            fade_ms: f64::from(fade_ms),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.timer.is_some() {
            Phase::Armed
        } else if self.started {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Absolute time at which the current slide nominally ends.
    pub fn due_at(&self) -> f64 {
        self.due_at
    }

    /// Time left on the current slide as of the last arm or stop.
    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    /// Arm an `Advance` for a slide lasting `duration_ms`.
    pub fn schedule_next<R: Runtime>(
        &mut self,
        runtime: &mut R,
        duration_ms: f64,
    ) -> SlideshowResult<()> {
        let fire_in = (duration_ms - self.fade_ms).max(0.0);
        self.arm(runtime, duration_ms, fire_in, Task::Advance)
    }

    /// Arm a `Finish` once the final slide has played for `duration_ms`.
    pub fn schedule_finish<R: Runtime>(
        &mut self,
        runtime: &mut R,
        duration_ms: f64,
    ) -> SlideshowResult<()> {
        self.arm(runtime, duration_ms, duration_ms, Task::Finish)
    }

    fn arm<R: Runtime>(
        &mut self,
        runtime: &mut R,
        duration_ms: f64,
        fire_in: f64,
        task: Task,
    ) -> SlideshowResult<()> {
        self.cancel(runtime);
        self.remaining_ms = duration_ms;
        self.due_at = runtime.now() + duration_ms;
        self.next_task = task;
        self.timer = Some(runtime.set_timeout(fire_in, task)?);
        Ok(())
    }

    /// Record that the outstanding timer went off. Returns false for a timer that was
    /// already cancelled, which the caller should ignore.
    pub fn fired(&mut self) -> bool {
        if self.timer.take().is_none() {
            return false;
        }
        if self.next_task == Task::Finish {
            // the pass is over; resuming starts the next one straight away
            self.next_task = Task::Advance;
            self.remaining_ms = 0.0;
        }
        true
    }

    /// Arm with the remembered remaining time. Returns false if already armed.
    pub fn resume<R: Runtime>(&mut self, runtime: &mut R) -> SlideshowResult<bool> {
        if self.playing && self.timer.is_some() {
            return Ok(false);
        }
        self.playing = true;
        self.started = true;
        let remaining = self.remaining_ms;
        match self.next_task {
            Task::Finish => self.schedule_finish(runtime, remaining)?,
            _ => self.schedule_next(runtime, remaining)?,
        }
        Ok(true)
    }

    /// Cancel the timer and remember the time left until the due timestamp. Pausing while
    /// nothing is armed keeps the remembered time as is.
    pub fn pause<R: Runtime>(&mut self, runtime: &mut R) {
        self.playing = false;
        self.started = true;
        if let Some(handle) = self.timer.take() {
            runtime.clear_timeout(handle);
            self.remaining_ms = (self.due_at - runtime.now()).max(0.0);
        }
    }

    fn cancel<R: Runtime>(&mut self, runtime: &mut R) {
        if let Some(handle) = self.timer.take() {
            runtime.clear_timeout(handle);
        }
    }
}
