use crate::bridge::Request;
use crate::state::ConnectionState;

/// The settings panel's port dropdown. The first option is always "no port".
#[derive(Debug)]
pub struct PortSelector {
    options: Vec<Option<String>>,
    selected: usize,
    populating: bool,
}

impl Default for PortSelector {
    fn default() -> Self {
        Self {
            options: vec![None],
            selected: 0,
            populating: false,
        }
    }
}

impl PortSelector {
    pub fn options(&self) -> &[Option<String>] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .and_then(|option| option.as_deref())
            .unwrap_or("")
    }

    pub fn is_populating(&self) -> bool {
        self.populating
    }

    /// Selection changes are ignored until `populate` or `abort_populate`.
    pub fn begin_populate(&mut self) {
        self.populating = true;
    }

    pub fn abort_populate(&mut self) {
        self.populating = false;
    }

    /// Rebuilds the options and preselects `saved` when it is still listed.
    pub fn populate(&mut self, ports: &[String], saved: Option<&str>) {
        self.options = std::iter::once(None)
            .chain(ports.iter().cloned().map(Some))
            .collect();
        self.selected = saved
            .and_then(|saved| {
                self.options
                    .iter()
                    .position(|option| option.as_deref() == Some(saved))
            })
            .unwrap_or(0);
        self.populating = false;
    }

    /// Picks an option, returning the request that applies it.
    pub fn select(&mut self, index: usize) -> Option<Request> {
        if self.populating || index == self.selected {
            return None;
        }
        let port_name = self.options.get(index)?.clone();
        self.selected = index;
        Some(Request::SetPort { port_name })
    }

    /// Snapshots that carry a port list refresh the options.
    pub fn sync(&mut self, snapshot: &ConnectionState) {
        if self.populating {
            return;
        }
        if let Some(ports) = &snapshot.ports {
            self.populate(ports, snapshot.port.as_deref());
        }
    }
}
