//! Request/response and push-event plumbing between the UI and the backend thread.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use bevy::log::{debug, warn};
use serde::Serialize;

use crate::camera::{HoldTarget, PanTilt, ZoomDirection};
use crate::error::CommandError;
use crate::state::ConnectionState;

pub type CallId = u64;

/// Commands the UI can invoke on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Request {
    OpenSettings,
    Ready,
    StopMove,
    StopZoom,
    SetPort { port_name: Option<String> },
    CameraPower { power: bool },
    Autofocus { autofocus: bool },
    GoToPreset { preset: u8, name: String },
    SetPreset { preset: u8, name: String },
    MoveCamera { direction: PanTilt },
    Zoom { direction: ZoomDirection },
    GetPorts,
    GetState,
}

impl Request {
    /// Starts the movement a hold button drives.
    pub fn begin(target: HoldTarget) -> Self {
        match target {
            HoldTarget::Pan(direction) => Self::MoveCamera { direction },
            HoldTarget::Zoom(direction) => Self::Zoom { direction },
        }
    }

    /// Stops the movement a hold button drives.
    pub fn stop(target: HoldTarget) -> Self {
        match target {
            HoldTarget::Pan(_) => Self::StopMove,
            HoldTarget::Zoom(_) => Self::StopZoom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Done,
    Ports(Vec<String>),
    State(ConnectionState),
}

pub type CallResult = Result<Reply, CommandError>;

/// Events the backend pushes without being asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    UiState(ConnectionState),
    Status(String),
}

#[derive(Debug)]
pub struct Call {
    pub id: CallId,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Reply { id: CallId, result: CallResult },
    Event(PushEvent),
}

/// Anything that can send a request to the backend and hand back its call id.
pub trait Invoke {
    fn invoke(&mut self, request: Request) -> CallId;
}

/// UI side of the bridge.
pub struct Bridge {
    calls: Sender<Call>,
    inbound: Receiver<Inbound>,
    local: VecDeque<Inbound>,
    next_id: CallId,
}

impl Bridge {
    /// Drains everything delivered since the last poll, in delivery order.
    pub fn poll(&mut self) -> Vec<Inbound> {
        let mut delivered: Vec<Inbound> = self.local.drain(..).collect();

        loop {
            match self.inbound.try_recv() {
                Ok(message) => delivered.push(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Calls made from now on fail locally in `invoke`
                    break;
                }
            }
        }

        delivered
    }
}

impl Invoke for Bridge {
    fn invoke(&mut self, request: Request) -> CallId {
        let id = self.next_id;
        self.next_id += 1;

        debug!("Invoking #{id}: {request:?}");

        if self.calls.send(Call { id, request }).is_err() {
            warn!("Backend is gone, failing call #{id}");
            self.local.push_back(Inbound::Reply {
                id,
                result: Err(CommandError("Backend is not running".into())),
            });
        }

        id
    }
}

/// Backend side of the bridge.
#[derive(Debug, Clone)]
pub struct Emitter {
    inbound: Sender<Inbound>,
}

impl Emitter {
    pub fn emit(&self, event: PushEvent) {
        // A closed UI is not an error for the backend
        if let Err(e) = self.inbound.send(Inbound::Event(event)) {
            debug!("UI is gone, dropping {:?}", e.0);
        }
    }

    pub fn reply(&self, id: CallId, result: CallResult) {
        if self.inbound.send(Inbound::Reply { id, result }).is_err() {
            debug!("UI is gone, dropping reply for call #{id}");
        }
    }
}

/// Creates a connected bridge, the receiving end for calls and the emitter for replies.
pub fn channel() -> (Bridge, Receiver<Call>, Emitter) {
    let (call_tx, call_rx) = mpsc::channel();
    let (inbound_tx, inbound_rx) = mpsc::channel();

    let bridge = Bridge {
        calls: call_tx,
        inbound: inbound_rx,
        local: VecDeque::new(),
        next_id: 1,
    };

    (bridge, call_rx, Emitter { inbound: inbound_tx })
}
