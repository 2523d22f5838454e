use bevy::prelude::*;
use std::collections::HashMap;

use crate::backend;
use crate::bridge::{Bridge, CallId, CallResult, Inbound, Invoke, PushEvent, Reply, Request};
use crate::config::HOLD_BUTTONS;
use crate::gesture::HoldButton;
use crate::mirror::StateMirror;
use crate::persistence::SettingsStore;
use crate::pointer::{ButtonId, PointerId, PointerRouter};
use crate::port_select::PortSelector;
use crate::presets::{PresetConfirmation, PresetRef};
use crate::serial::SystemPorts;
use crate::state::ConnectionState;
use crate::status::StatusLog;

/// What the reply to a pending call should update.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Awaiting {
    State,
    Ports,
    OpenSettings,
    Gesture(ButtonId),
    Preset(String),
    // Failures open the error dialog
    Settings,
    // Failures go to the status line
    Command,
}

// Abort signals are Rc-based, so the UI state is a NonSend resource
// and only ever touched from the main thread
pub struct AppState {
    bridge: Bridge,
    store: SettingsStore,
    mirror: StateMirror,
    pending: HashMap<CallId, Awaiting>,
    pub status: StatusLog,
    pub hold_buttons: Vec<HoldButton>,
    pub router: PointerRouter,
    pub port_select: PortSelector,
    pub presets: Vec<PresetRef>,
    pub confirm: PresetConfirmation,
    pub error_dialog: Option<String>,
    pub show_settings: bool,
    pub auto_scroll_logs: bool,
}

impl AppState {
    pub fn new(bridge: Bridge, store: SettingsStore) -> Self {
        let hold_buttons = HOLD_BUTTONS
            .iter()
            .enumerate()
            .filter_map(|(index, &(label, direction))| match direction.parse() {
                Ok(target) => Some(HoldButton::new(ButtonId(index), label, target)),
                Err(e) => {
                    warn!("Skipping hold button {label}: {e}");
                    None
                }
            })
            .collect();

        Self {
            bridge,
            store,
            mirror: StateMirror::default(),
            pending: HashMap::new(),
            status: StatusLog::default(),
            hold_buttons,
            router: PointerRouter::default(),
            port_select: PortSelector::default(),
            presets: PresetRef::all(),
            confirm: PresetConfirmation::default(),
            error_dialog: None,
            show_settings: false,
            auto_scroll_logs: true,
        }
    }

    pub fn mirror(&self) -> &StateMirror {
        &self.mirror
    }

    /// Fetches the initial snapshot and tells the backend the UI is up.
    pub fn start(&mut self) {
        self.call(Request::GetState, Awaiting::State);
        self.call(Request::Ready, Awaiting::Command);
    }

    /// Applies everything the backend delivered since the last frame.
    pub fn poll(&mut self) {
        for inbound in self.bridge.poll() {
            match inbound {
                Inbound::Event(PushEvent::UiState(snapshot)) => self.apply_snapshot(snapshot),
                Inbound::Event(PushEvent::Status(status)) => self.status.set(status),
                Inbound::Reply { id, result } => self.on_reply(id, result),
            }
        }
    }

    pub fn open_settings(&mut self) {
        self.call(Request::OpenSettings, Awaiting::OpenSettings);
    }

    pub fn list_ports(&mut self) {
        self.port_select.begin_populate();
        self.call(Request::GetPorts, Awaiting::Ports);
    }

    pub fn select_port(&mut self, index: usize) {
        if let Some(request) = self.port_select.select(index) {
            self.call(request, Awaiting::Settings);
        }
    }

    pub fn set_power(&mut self, power: bool) {
        self.call(Request::CameraPower { power }, Awaiting::Settings);
    }

    pub fn set_autofocus(&mut self, autofocus: bool) {
        self.call(Request::Autofocus { autofocus }, Awaiting::Settings);
    }

    pub fn go_to_preset(&mut self, preset: &PresetRef) {
        self.call(preset.go_to(), Awaiting::Preset(preset.name.clone()));
    }

    pub fn ask_set_preset(&mut self, preset: &PresetRef) {
        self.confirm.ask(preset.clone());
    }

    pub fn answer_set_preset(&mut self, accepted: bool) {
        if let Some(request) = self.confirm.answer(accepted) {
            self.call(request, Awaiting::Settings);
        }
    }

    pub fn press(&mut self, button: ButtonId, pointer: PointerId) {
        if !self.mirror.controls_enabled() {
            return;
        }

        let Self {
            bridge,
            router,
            pending,
            hold_buttons,
            ..
        } = self;
        let Some(hold) = hold_buttons.iter_mut().find(|hold| hold.id() == button) else {
            return;
        };
        if let Some(call) = hold.pointer_down(pointer, bridge, router) {
            pending.insert(call, Awaiting::Gesture(button));
        }
    }

    pub fn release(&mut self, pointer: PointerId, hovered: Option<ButtonId>) {
        let fired = self.router.pointer_up(pointer, hovered);

        let Self {
            bridge,
            pending,
            hold_buttons,
            ..
        } = self;
        for button in fired {
            let Some(hold) = hold_buttons.iter_mut().find(|hold| hold.id() == button) else {
                continue;
            };
            if let Some(stop) = hold.pointer_up(pointer, bridge) {
                pending.insert(stop, Awaiting::Gesture(button));
            }
        }
    }

    fn call(&mut self, request: Request, awaiting: Awaiting) {
        let id = self.bridge.invoke(request);
        self.pending.insert(id, awaiting);
    }

    fn apply_snapshot(&mut self, snapshot: ConnectionState) {
        self.status.sync(&snapshot.status);
        self.port_select.sync(&snapshot);
        self.mirror.apply(snapshot);
    }

    fn on_reply(&mut self, id: CallId, result: CallResult) {
        let Some(awaiting) = self.pending.remove(&id) else {
            debug!("Dropping reply for unknown call #{id}");
            return;
        };

        match (awaiting, result) {
            (Awaiting::Gesture(button), result) => self.settle_gesture(button, id, &result),
            (Awaiting::State, Ok(Reply::State(snapshot))) => self.apply_snapshot(snapshot),
            (Awaiting::Ports, Ok(Reply::Ports(ports))) => {
                let saved = self
                    .store
                    .port()
                    .or_else(|| self.mirror.snapshot().port.clone());
                self.port_select.populate(&ports, saved.as_deref());
            }
            (Awaiting::Ports, Err(e)) => {
                self.port_select.abort_populate();
                self.error_dialog = Some(e.to_string());
            }
            (Awaiting::OpenSettings, Ok(_)) => {
                self.show_settings = true;
                self.list_ports();
            }
            (Awaiting::Preset(name), Ok(_)) => self.status.set(name),
            (Awaiting::Settings, Err(e)) => self.error_dialog = Some(e.to_string()),
            (_, Err(e)) => self.status.error(&e),
            (awaiting @ (Awaiting::State | Awaiting::Ports), Ok(reply)) => {
                warn!("Unexpected reply for {awaiting:?}: {reply:?}");
            }
            (_, Ok(_)) => {}
        }
    }

    fn settle_gesture(&mut self, button: ButtonId, call: CallId, result: &CallResult) {
        let Self {
            bridge,
            router,
            pending,
            hold_buttons,
            status,
            ..
        } = self;
        let Some(hold) = hold_buttons.iter_mut().find(|hold| hold.id() == button) else {
            return;
        };
        if let Some(stop) = hold.on_reply(call, result, bridge, router, status) {
            pending.insert(stop, Awaiting::Gesture(button));
        }
    }
}

/// Spawns the camera, starts the backend thread and installs the UI state.
pub fn setup(world: &mut World) {
    world.spawn(Camera2d);

    let store = SettingsStore::user();
    match backend::start_backend_thread(SystemPorts, store.clone()) {
        Ok(bridge) => {
            let mut state = AppState::new(bridge, store);
            state.start();
            world.insert_non_send_resource(state);
        }
        Err(e) => {
            error!("Failed to start camera backend: {e}");
            world.send_event(AppExit::error());
        }
    }
}

/// Drains backend replies and events once per frame.
pub fn bridge_system(state: Option<NonSendMut<AppState>>) {
    if let Some(mut state) = state {
        state.poll();
    }
}
