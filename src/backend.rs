use std::io;
use std::sync::mpsc;
use std::thread;

use bevy::log::{debug, info, warn};

use crate::bridge::{self, Bridge, Call, CallResult, Emitter, PushEvent, Reply, Request};
use crate::error::Result;
use crate::persistence::SettingsStore;
use crate::serial::PortProvider;
use crate::state::UiState;

/// Owns the camera connection and answers UI requests one at a time.
pub struct Backend<P: PortProvider> {
    state: UiState,
    ports: P,
    store: SettingsStore,
    events: Emitter,
}

impl<P: PortProvider> Backend<P> {
    pub fn new(ports: P, store: SettingsStore, events: Emitter) -> Self {
        Self {
            state: UiState::default(),
            ports,
            store,
            events,
        }
    }

    /// Reopens the last saved port. A port that no longer opens is forgotten.
    pub fn initialize(&mut self) {
        let Some(port) = self.store.load().port else {
            return;
        };

        match self.state.connect(&self.ports, Some(&port)) {
            Ok(()) => info!("Reconnected to {port}"),
            Err(e) => {
                warn!("Could not reopen saved port {port}: {e}");
                if let Err(e) = self.store.set_port(None) {
                    warn!("Failed to clear saved port: {e}");
                }
            }
        }
    }

    pub fn handle(&mut self, request: Request) -> CallResult {
        match request {
            Request::OpenSettings => {
                let result = self.state.refresh_ports(&self.ports);
                if let Err(e) = &result {
                    self.state.set_status(e.to_string());
                }
                self.publish();
                result.map(|_| Reply::Done).map_err(Into::into)
            }
            Request::Ready => {
                self.announce();
                Ok(Reply::Done)
            }
            Request::GetState => Ok(Reply::State(self.state.snapshot())),
            Request::GetPorts => Ok(Reply::Ports(self.ports.available_ports()?)),
            Request::SetPort { port_name } => self.set_port(port_name.as_deref()),
            Request::CameraPower { power } => {
                let label = if power { "Power on" } else { "Power off" };
                self.run(label, |state| state.set_power(power))
            }
            Request::Autofocus { autofocus } => {
                let label = if autofocus {
                    "Autofocus on"
                } else {
                    "Autofocus off"
                };
                self.run(label, |state| state.set_autofocus(autofocus))
            }
            Request::GoToPreset { preset, name } => {
                self.run(&name, |state| state.camera()?.go_to_preset(preset))
            }
            Request::SetPreset { preset, name } => {
                self.run(&format!("Set {name}"), |state| {
                    state.camera()?.set_preset(preset)
                })
            }
            Request::MoveCamera { direction } => {
                self.run(&format!("Moving {direction}"), |state| {
                    state.camera()?.pan_tilt(direction)
                })
            }
            Request::StopMove => self.run("Done moving", |state| state.camera()?.stop_move()),
            Request::Zoom { direction } => self.run(&format!("Zooming {direction}"), |state| {
                state.camera()?.zoom(direction)
            }),
            Request::StopZoom => self.run("Done zooming", |state| state.camera()?.stop_zoom()),
        }
    }

    fn set_port(&mut self, port_name: Option<&str>) -> CallResult {
        let result = self.state.connect(&self.ports, port_name);

        match &result {
            Ok(()) => {
                if let Err(e) = self.store.set_port(self.state.port_name()) {
                    warn!("Failed to save port: {e}");
                }
            }
            Err(e) => self.state.set_status(e.to_string()),
        }

        self.announce();
        result.map(|()| Reply::Done).map_err(Into::into)
    }

    /// Runs a camera command, reporting `label` on success and the error otherwise.
    fn run<F>(&mut self, label: &str, command: F) -> CallResult
    where
        F: FnOnce(&mut UiState) -> Result<()>,
    {
        let result = command(&mut self.state);

        match &result {
            Ok(()) => self.state.set_status(label),
            Err(e) => self.state.set_status(e.to_string()),
        }

        self.announce();
        result.map(|()| Reply::Done).map_err(Into::into)
    }

    fn announce(&self) {
        self.events
            .emit(PushEvent::Status(self.state.status().to_string()));
        self.publish();
    }

    fn publish(&self) {
        self.events.emit(PushEvent::UiState(self.state.snapshot()));
    }
}

/// Starts the backend on its own thread and returns the UI end of the bridge.
pub fn start_backend_thread<P>(ports: P, store: SettingsStore) -> io::Result<Bridge>
where
    P: PortProvider + 'static,
{
    let (bridge, calls, events) = bridge::channel();
    info!("Settings stored at {:?}", store.path());
    let backend = Backend::new(ports, store, events);

    thread::Builder::new()
        .name("camera-backend".to_string())
        .spawn(move || backend_loop(backend, calls))?;

    Ok(bridge)
}

fn backend_loop<P: PortProvider>(mut backend: Backend<P>, calls: mpsc::Receiver<Call>) {
    backend.initialize();
    backend.publish();

    // Ends once the UI drops its side of the bridge
    for Call { id, request } in calls {
        debug!("Handling #{id}: {request:?}");
        let result = backend.handle(request);
        if let Err(e) = &result {
            debug!("Call #{id} failed: {e}");
        }
        backend.events.reply(id, result);
    }

    info!("Backend thread exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Inbound;
    use crate::camera::{PanTilt, ZoomDirection};
    use crate::error::CommandError;
    use crate::state::ConnectionState;
    use crate::testing::FakePorts;

    const POWERED_WITH_AF: &[u8] = b"\x90\x50\x02\xFF\x90\x50\x02\xFF";
    const ACK_AND_DONE: &[u8] = b"\x90\x41\xFF\x90\x51\xFF";

    struct Harness {
        backend: Backend<FakePorts>,
        bridge: Bridge,
        _dir: tempfile::TempDir,
        store: SettingsStore,
    }

    fn harness(ports: FakePorts) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("config.json"));
        let (bridge, _calls, events) = bridge::channel();
        Harness {
            backend: Backend::new(ports, store.clone(), events),
            bridge,
            _dir: dir,
            store,
        }
    }

    impl Harness {
        fn statuses(&mut self) -> Vec<String> {
            self.bridge
                .poll()
                .into_iter()
                .filter_map(|inbound| match inbound {
                    Inbound::Event(PushEvent::Status(status)) => Some(status),
                    _ => None,
                })
                .collect()
        }

        fn last_snapshot(&mut self) -> Option<ConnectionState> {
            self.bridge
                .poll()
                .into_iter()
                .filter_map(|inbound| match inbound {
                    Inbound::Event(PushEvent::UiState(snapshot)) => Some(snapshot),
                    _ => None,
                })
                .last()
        }
    }

    fn camera_replies(extra: &[u8]) -> Vec<u8> {
        [POWERED_WITH_AF, extra].concat()
    }

    #[test]
    fn test_set_port_connects_and_saves() {
        let mut h = harness(FakePorts::new().with_camera("COM3", POWERED_WITH_AF));

        let result = h.backend.handle(Request::SetPort {
            port_name: Some("COM3".into()),
        });

        assert_eq!(result, Ok(Reply::Done));
        let snapshot = h.last_snapshot().unwrap();
        assert_eq!(snapshot.port.as_deref(), Some("COM3"));
        assert_eq!(snapshot.status, "Connected");
        assert_eq!(h.store.port().as_deref(), Some("COM3"));
    }

    #[test]
    fn test_set_port_failure_reports_error_and_keeps_saved_port() {
        let mut h = harness(FakePorts::new().with_port("COM7"));
        h.store.set_port(Some("COM3")).unwrap();

        let result = h.backend.handle(Request::SetPort {
            port_name: Some("COM7".into()),
        });

        let error = result.unwrap_err();
        assert!(error.0.contains("COM7 not found"));
        assert_eq!(h.statuses(), vec![error.0]);
        assert_eq!(h.store.port().as_deref(), Some("COM3"));
    }

    #[test]
    fn test_clearing_port_disconnects() {
        let mut h = harness(FakePorts::new().with_camera("COM3", POWERED_WITH_AF));
        h.backend
            .handle(Request::SetPort {
                port_name: Some("COM3".into()),
            })
            .unwrap();

        h.backend.handle(Request::SetPort { port_name: None }).unwrap();

        let snapshot = h.last_snapshot().unwrap();
        assert_eq!(snapshot.port, None);
        assert_eq!(snapshot.status, "Disconnected");
        assert_eq!(h.store.port(), None);
    }

    #[test]
    fn test_command_without_port_fails() {
        let mut h = harness(FakePorts::new());

        let result = h.backend.handle(Request::MoveCamera {
            direction: PanTilt::Up,
        });

        assert_eq!(result, Err(CommandError("No port set".into())));
        assert_eq!(h.statuses(), vec!["No port set".to_string()]);
    }

    #[test]
    fn test_move_and_stop_report_progress() {
        let replies = camera_replies(&[ACK_AND_DONE, ACK_AND_DONE].concat());
        let mut h = harness(FakePorts::new().with_camera("COM3", &replies));
        h.backend
            .handle(Request::SetPort {
                port_name: Some("COM3".into()),
            })
            .unwrap();
        h.bridge.poll();

        h.backend
            .handle(Request::MoveCamera {
                direction: PanTilt::Left,
            })
            .unwrap();
        h.backend.handle(Request::StopMove).unwrap();

        assert_eq!(h.statuses(), vec!["Moving left", "Done moving"]);
    }

    #[test]
    fn test_zoom_reports_direction() {
        let mut h = harness(FakePorts::new().with_camera("COM3", &camera_replies(ACK_AND_DONE)));
        h.backend
            .handle(Request::SetPort {
                port_name: Some("COM3".into()),
            })
            .unwrap();
        h.bridge.poll();

        h.backend
            .handle(Request::Zoom {
                direction: ZoomDirection::Out,
            })
            .unwrap();

        assert_eq!(h.statuses(), vec!["Zooming out"]);
    }

    #[test]
    fn test_camera_error_becomes_status() {
        // Completion replaced by "command not executable"
        let replies = camera_replies(b"\x90\x41\xFF\x90\x61\x41\xFF");
        let mut h = harness(FakePorts::new().with_camera("COM3", &replies));
        h.backend
            .handle(Request::SetPort {
                port_name: Some("COM3".into()),
            })
            .unwrap();
        h.bridge.poll();

        let result = h.backend.handle(Request::GoToPreset {
            preset: 2,
            name: "Preset 3".into(),
        });

        assert_eq!(
            result,
            Err(CommandError("Camera error: command not executable".into()))
        );
        assert_eq!(h.statuses(), vec!["Camera error: command not executable"]);
    }

    #[test]
    fn test_power_updates_snapshot() {
        let mut h = harness(FakePorts::new().with_camera("COM3", &camera_replies(ACK_AND_DONE)));
        h.backend
            .handle(Request::SetPort {
                port_name: Some("COM3".into()),
            })
            .unwrap();
        h.bridge.poll();

        h.backend.handle(Request::CameraPower { power: false }).unwrap();

        let inbound = h.bridge.poll();
        assert!(inbound.contains(&Inbound::Event(PushEvent::Status("Power off".into()))));
        let snapshot = inbound.into_iter().rev().find_map(|inbound| match inbound {
            Inbound::Event(PushEvent::UiState(snapshot)) => Some(snapshot),
            _ => None,
        });
        assert!(!snapshot.unwrap().power);
    }

    #[test]
    fn test_open_settings_lists_ports() {
        let mut h = harness(FakePorts::new().with_port("COM1").with_port("COM2"));

        h.backend.handle(Request::OpenSettings).unwrap();

        let snapshot = h.last_snapshot().unwrap();
        assert_eq!(
            snapshot.ports,
            Some(vec!["COM1".to_string(), "COM2".to_string()])
        );
    }

    #[test]
    fn test_port_listing_failure() {
        let mut h = harness(FakePorts::new().failing_listing());

        assert!(h.backend.handle(Request::GetPorts).is_err());
        assert!(h.backend.handle(Request::OpenSettings).is_err());
    }

    #[test]
    fn test_get_state_returns_snapshot() {
        let mut h = harness(FakePorts::new());
        assert_eq!(
            h.backend.handle(Request::GetState),
            Ok(Reply::State(ConnectionState::default()))
        );
    }

    #[test]
    fn test_initialize_restores_saved_port() {
        let mut h = harness(FakePorts::new().with_camera("COM3", POWERED_WITH_AF));
        h.store.set_port(Some("COM3")).unwrap();

        h.backend.initialize();

        assert_eq!(
            h.backend.handle(Request::GetState),
            Ok(Reply::State(ConnectionState {
                port: Some("COM3".into()),
                ports: None,
                status: "Connected".into(),
                power: true,
                autofocus: true,
            }))
        );
    }

    #[test]
    fn test_initialize_forgets_missing_port() {
        let mut h = harness(FakePorts::new());
        h.store.set_port(Some("COM3")).unwrap();

        h.backend.initialize();

        assert_eq!(h.store.port(), None);
        assert_eq!(
            h.backend.handle(Request::GetState),
            Ok(Reply::State(ConnectionState::default()))
        );
    }

    #[test]
    fn test_thread_answers_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("config.json"));
        let mut bridge = start_backend_thread(FakePorts::new(), store).unwrap();

        use crate::bridge::Invoke;
        let id = bridge.invoke(Request::GetState);

        let reply = loop {
            let found = bridge.poll().into_iter().find_map(|inbound| match inbound {
                Inbound::Reply { id: reply_id, result } if reply_id == id => Some(result),
                _ => None,
            });
            if let Some(result) = found {
                break result;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        };

        assert_eq!(reply, Ok(Reply::State(ConnectionState::default())));
    }
}
