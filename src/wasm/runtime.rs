use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

use super::BrowserShow;
use crate::error::SlideshowResult;
use crate::platform::{Runtime, Task, TimerHandle};
use crate::{console_error, console_warn};

/// `window` timers and animation frames feeding tasks back into the slideshow.
pub struct BrowserRuntime {
    window: Window,
    performance: Performance,
    show: Weak<RefCell<BrowserShow>>,
}

impl BrowserRuntime {
    pub fn new(window: Window, performance: Performance, show: Weak<RefCell<BrowserShow>>) -> Self {
        Self {
            window,
            performance,
            show,
        }
    }
}

fn dispatch(show: &Weak<RefCell<BrowserShow>>, task: Task) {
    let Some(cell) = show.upgrade() else {
        return;
    };
    let Ok(mut show) = cell.try_borrow_mut() else {
        console_warn!("slideshow busy; dropped {task:?}");
        return;
    };
    if let Err(err) = show.run(task) {
        console_error!("slideshow task {task:?} failed: {err}");
    }
}

impl Runtime for BrowserRuntime {
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn set_timeout(&mut self, delay_ms: f64, task: Task) -> SlideshowResult<TimerHandle> {
        let show = self.show.clone();
        let callback = Closure::once_into_js(move || dispatch(&show, task));
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.round() as i32,
            )?;
        Ok(TimerHandle(id))
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }

    fn next_frame(&mut self, task: Task) -> SlideshowResult<()> {
        let show = self.show.clone();
        let callback = Closure::once_into_js(move || dispatch(&show, task));
        self.window
            .request_animation_frame(callback.unchecked_ref())?;
        Ok(())
    }
}
