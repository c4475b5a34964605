//! Shared per-frame tick.

use std::{cell::RefCell, rc::Rc};

use log::trace;

use crate::PointerState;

/// Anything driven by the shared frame tick.
pub trait FrameListener {
    fn frame(&mut self, pointer: &PointerState);
}

/// Handle returned by [`FrameScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Single shared per-frame tick.
///
/// The host forwards pointer events here and calls [`tick`] once per
/// frame; the scheduler reads the pointer state once and fans it out to
/// every registered listener. Listeners are held behind `Rc<RefCell<..>>`
/// per the single-threaded cooperative model; `tick` iterates a snapshot
/// of the registration list, so adding or removing listeners from within
/// a callback takes effect on the next tick rather than corrupting the
/// current one.
///
/// [`tick`]: FrameScheduler::tick
#[derive(Default)]
pub struct FrameScheduler {
    pointer: PointerState,
    listeners: Vec<(ListenerId, Rc<RefCell<dyn FrameListener>>)>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn register(&mut self, listener: Rc<RefCell<dyn FrameListener>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        trace!("registered frame listener {id:?}");
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// One frame: fan the current pointer state out to every listener.
    /// A listener that is already borrowed (re-entrant tick) is skipped
    /// for this frame rather than panicking.
    pub fn tick(&mut self) {
        let pointer = self.pointer;
        let snapshot: Vec<Rc<RefCell<dyn FrameListener>>> =
            self.listeners.iter().map(|(_, listener)| Rc::clone(listener)).collect();
        for listener in snapshot {
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener.frame(&pointer);
            }
        }
    }
}
