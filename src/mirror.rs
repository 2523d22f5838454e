use crate::state::ConnectionState;

/// The UI's read-only copy of the backend state.
///
/// Only the bridge dispatcher applies snapshots, and each one replaces the
/// previous copy wholesale. Everything the panels show is derived from here.
#[derive(Debug, Default)]
pub struct StateMirror {
    snapshot: ConnectionState,
}

impl StateMirror {
    pub fn apply(&mut self, snapshot: ConnectionState) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &ConnectionState {
        &self.snapshot
    }

    /// Camera controls are usable only while a port is open.
    pub fn controls_enabled(&self) -> bool {
        self.snapshot.port.is_some()
    }

    pub fn controls(&self) -> ControlsView {
        ControlsView {
            enabled: self.controls_enabled(),
            power: self.snapshot.power,
            autofocus: self.snapshot.autofocus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsView {
    pub enabled: bool,
    pub power: bool,
    pub autofocus: bool,
}
