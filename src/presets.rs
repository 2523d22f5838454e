use crate::bridge::Request;
use crate::config::PRESETS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRef {
    pub index: u8,
    pub name: String,
}

impl PresetRef {
    pub fn all() -> Vec<Self> {
        PRESETS
            .iter()
            .map(|&(index, name)| Self {
                index,
                name: name.to_string(),
            })
            .collect()
    }

    pub fn go_to(&self) -> Request {
        Request::GoToPreset {
            preset: self.index,
            name: self.name.clone(),
        }
    }

    pub fn set(&self) -> Request {
        Request::SetPreset {
            preset: self.index,
            name: self.name.clone(),
        }
    }
}

/// Overwriting a preset needs a yes from the user first.
#[derive(Debug, Default)]
pub struct PresetConfirmation {
    pending: Option<PresetRef>,
}

impl PresetConfirmation {
    pub fn ask(&mut self, preset: PresetRef) {
        self.pending = Some(preset);
    }

    pub fn question(&self) -> Option<String> {
        self.pending
            .as_ref()
            .map(|preset| format!("Are you sure you want to set {}?", preset.name))
    }

    /// Closes the dialog. Only a yes produces a request.
    pub fn answer(&mut self, accepted: bool) -> Option<Request> {
        let preset = self.pending.take()?;
        accepted.then(|| preset.set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_come_from_config() {
        let presets = PresetRef::all();
        assert_eq!(presets.len(), PRESETS.len());
        assert_eq!(presets[0].name, "Preset 1");
        assert_eq!(
            presets[2].go_to(),
            Request::GoToPreset {
                preset: 2,
                name: "Preset 3".into()
            }
        );
    }

    #[test]
    fn test_confirmed_set_sends_request() {
        let mut confirm = PresetConfirmation::default();
        confirm.ask(PresetRef::all()[1].clone());

        assert_eq!(
            confirm.question().as_deref(),
            Some("Are you sure you want to set Preset 2?")
        );
        assert_eq!(
            confirm.answer(true),
            Some(Request::SetPreset {
                preset: 1,
                name: "Preset 2".into()
            })
        );
        assert_eq!(confirm.question(), None);
    }

    #[test]
    fn test_declined_set_sends_nothing() {
        let mut confirm = PresetConfirmation::default();
        confirm.ask(PresetRef::all()[0].clone());

        assert_eq!(confirm.answer(false), None);
        assert_eq!(confirm.question(), None);
        assert_eq!(confirm.answer(true), None);
    }
}
