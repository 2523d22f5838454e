//! Press-and-hold camera controls.
//!
//! A press sends the begin request for the button's direction, and the
//! matching release sends exactly one stop. The pointer stays captured on the
//! button for the whole gesture, and the release listener is aborted once the
//! gesture settles, whether it succeeded or not.

use std::mem;

use bevy::log::debug;

use crate::bridge::{CallId, CallResult, Invoke, Request};
use crate::camera::HoldTarget;
use crate::pointer::{AbortController, ButtonId, PointerId, PointerRouter};
use crate::status::StatusLog;

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Starting {
        call: CallId,
        pointer: PointerId,
        controller: AbortController,
        released: bool,
    },
    Moving {
        pointer: PointerId,
        controller: AbortController,
    },
    Stopping {
        call: CallId,
        pointer: PointerId,
        controller: AbortController,
    },
}

#[derive(Debug)]
pub struct HoldButton {
    id: ButtonId,
    label: String,
    target: HoldTarget,
    phase: Phase,
}

impl HoldButton {
    pub fn new(id: ButtonId, label: impl Into<String>, target: HoldTarget) -> Self {
        Self {
            id,
            label: label.into(),
            target,
            phase: Phase::Idle,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Starts a gesture. Returns the begin call, or `None` if one is already running.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        bridge: &mut impl Invoke,
        router: &mut PointerRouter,
    ) -> Option<CallId> {
        if !self.is_idle() {
            debug!("Ignoring press on {:?}, gesture still active", self.target);
            return None;
        }

        let call = bridge.invoke(Request::begin(self.target));
        let controller = AbortController::default();
        router.set_capture(self.id, pointer);
        router.on_release(self.id, controller.signal());

        self.phase = Phase::Starting {
            call,
            pointer,
            controller,
            released: false,
        };
        Some(call)
    }

    /// Handles a release routed to this button. Returns the stop call if one was sent.
    pub fn pointer_up(&mut self, pointer: PointerId, bridge: &mut impl Invoke) -> Option<CallId> {
        match mem::take(&mut self.phase) {
            Phase::Starting {
                call,
                pointer: owner,
                controller,
                ..
            } if owner == pointer => {
                self.phase = Phase::Starting {
                    call,
                    pointer: owner,
                    controller,
                    released: true,
                };
                None
            }
            Phase::Moving {
                pointer: owner,
                controller,
            } if owner == pointer => {
                let call = bridge.invoke(Request::stop(self.target));
                self.phase = Phase::Stopping {
                    call,
                    pointer: owner,
                    controller,
                };
                Some(call)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Settles a begin or stop reply. Returns a follow-up stop call if one was sent.
    pub fn on_reply(
        &mut self,
        call: CallId,
        result: &CallResult,
        bridge: &mut impl Invoke,
        router: &mut PointerRouter,
        status: &mut StatusLog,
    ) -> Option<CallId> {
        match mem::take(&mut self.phase) {
            Phase::Starting {
                call: begin,
                pointer,
                controller,
                released,
            } if begin == call => match result {
                Ok(_) if released => {
                    let stop = bridge.invoke(Request::stop(self.target));
                    self.phase = Phase::Stopping {
                        call: stop,
                        pointer,
                        controller,
                    };
                    Some(stop)
                }
                Ok(_) => {
                    self.phase = Phase::Moving {
                        pointer,
                        controller,
                    };
                    None
                }
                Err(e) => {
                    finish(router, self.id, pointer, &controller);
                    status.error(e);
                    None
                }
            },
            Phase::Stopping {
                call: stop,
                pointer,
                controller,
            } if stop == call => {
                finish(router, self.id, pointer, &controller);
                if let Err(e) = result {
                    status.error(e);
                }
                None
            }
            other => {
                self.phase = other;
                None
            }
        }
    }
}

fn finish(
    router: &mut PointerRouter,
    button: ButtonId,
    pointer: PointerId,
    controller: &AbortController,
) {
    controller.abort();
    router.release_capture(button, pointer);
}
