//! Pointer capture and abortable pointer-up listeners for hold buttons.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// The mouse, or the first touch egui folds into it.
pub const MOUSE: PointerId = PointerId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Rc<Cell<bool>>);

impl AbortSignal {
    pub fn aborted(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    pub fn abort(&self) {
        self.signal.0.set(true);
    }
}

#[derive(Debug)]
struct ReleaseListener {
    button: ButtonId,
    signal: AbortSignal,
}

#[derive(Debug, Default)]
pub struct PointerRouter {
    captures: HashMap<PointerId, ButtonId>,
    listeners: Vec<ReleaseListener>,
}

impl PointerRouter {
    pub fn set_capture(&mut self, button: ButtonId, pointer: PointerId) {
        self.captures.insert(pointer, button);
    }

    /// Releases `pointer` only if `button` still holds it.
    pub fn release_capture(&mut self, button: ButtonId, pointer: PointerId) {
        if self.captured_by(pointer) == Some(button) {
            self.captures.remove(&pointer);
        }
    }

    pub fn captured_by(&self, pointer: PointerId) -> Option<ButtonId> {
        self.captures.get(&pointer).copied()
    }

    /// Listens for pointer-up on `button` until `signal` is aborted.
    pub fn on_release(&mut self, button: ButtonId, signal: AbortSignal) {
        self.listeners.push(ReleaseListener { button, signal });
    }

    /// Delivers a pointer-up. Returns one entry per live listener that fired.
    pub fn pointer_up(&mut self, pointer: PointerId, hovered: Option<ButtonId>) -> Vec<ButtonId> {
        self.prune();

        let Some(target) = self.captured_by(pointer).or(hovered) else {
            return Vec::new();
        };

        self.listeners
            .iter()
            .filter(|listener| listener.button == target)
            .map(|listener| listener.button)
            .collect()
    }

    pub fn listener_count(&self, button: ButtonId) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.button == button && !listener.signal.aborted())
            .count()
    }

    fn prune(&mut self) {
        self.listeners.retain(|listener| !listener.signal.aborted());
    }
}
