//! Frame scheduling with an explicit start/stop handle.
//!
//! A host scheduler only ever fires a callback once, so the loop re-arms
//! itself after every tick while it is running. Stopping cancels whatever
//! frame is pending; nothing runs after `stop` returns.

use crate::error::FieldError;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Frame callbacks receive the host timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait FrameScheduler {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FieldError>;
    fn cancel(&self, id: FrameId);
}

/// `requestAnimationFrame` on the global window.
pub struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    pub fn new() -> Result<Self, FieldError> {
        let window = web_sys::window().ok_or(FieldError::NoWindow)?;
        Ok(BrowserScheduler { window })
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FieldError> {
        // Frees itself once invoked; a cancelled frame keeps its closure.
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        let id = self
            .window
            .request_animation_frame(closure.unchecked_ref())?;
        Ok(FrameId(id))
    }

    fn cancel(&self, id: FrameId) {
        if let Err(err) = self.window.cancel_animation_frame(id.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", err);
        }
    }
}

/// Queues callbacks until [`ManualScheduler::fire`] is called. Lets the
/// frame loop run headless.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<i32>,
    queued: RefCell<Vec<(FrameId, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    pub fn pending(&self) -> usize {
        self.queued.borrow().len()
    }

    /// Runs every callback queued before this call at `timestamp`.
    /// Callbacks queued while firing wait for the next call.
    pub fn fire(&self, timestamp: f64) -> usize {
        let due = std::mem::take(&mut *self.queued.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FieldError> {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.queued.borrow_mut().push((id, callback));
        Ok(id)
    }

    fn cancel(&self, id: FrameId) {
        self.queued.borrow_mut().retain(|(queued, _)| *queued != id);
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FieldError> {
        (**self).request(callback)
    }

    fn cancel(&self, id: FrameId) {
        (**self).cancel(id)
    }
}

struct LoopState<S: FrameScheduler> {
    scheduler: S,
    tick: RefCell<Box<dyn FnMut(f64)>>,
    pending: Cell<Option<FrameId>>,
    running: Cell<bool>,
}

/// Start/stop handle around a self-rescheduling tick.
pub struct AnimationLoop<S: FrameScheduler + 'static> {
    state: Rc<LoopState<S>>,
}

impl<S: FrameScheduler + 'static> AnimationLoop<S> {
    /// Creates a stopped loop; call [`AnimationLoop::start`] to begin.
    pub fn new<F>(scheduler: S, tick: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        AnimationLoop {
            state: Rc::new(LoopState {
                scheduler,
                tick: RefCell::new(Box::new(tick)),
                pending: Cell::new(None),
                running: Cell::new(false),
            }),
        }
    }

    pub fn start(&self) -> Result<(), FieldError> {
        if self.state.running.get() {
            return Ok(());
        }
        self.state.running.set(true);
        if let Err(err) = arm(&self.state) {
            self.state.running.set(false);
            return Err(err);
        }
        Ok(())
    }

    pub fn stop(&self) {
        self.state.running.set(false);
        if let Some(id) = self.state.pending.take() {
            self.state.scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

impl<S: FrameScheduler + 'static> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

// At most one frame is ever pending; a tick that restarts the loop has
// already armed the next one.
fn arm<S: FrameScheduler + 'static>(state: &Rc<LoopState<S>>) -> Result<(), FieldError> {
    if state.pending.get().is_some() {
        return Ok(());
    }
    let weak: Weak<LoopState<S>> = Rc::downgrade(state);
    let id = state.scheduler.request(Box::new(move |timestamp| {
        if let Some(state) = weak.upgrade() {
            fire(&state, timestamp);
        }
    }))?;
    state.pending.set(Some(id));
    Ok(())
}

fn fire<S: FrameScheduler + 'static>(state: &Rc<LoopState<S>>, timestamp: f64) {
    state.pending.set(None);
    if !state.running.get() {
        return;
    }
    {
        let mut tick = state.tick.borrow_mut();
        (&mut *tick)(timestamp);
    }
    // The tick may have stopped the loop
    if state.running.get() {
        if let Err(err) = arm(state) {
            log::error!("could not schedule next frame: {}", err);
            state.running.set(false);
        }
    }
}
