//! Derived availability of the navigation controls.

use std::fmt;

use serde::Serialize;

/// A navigation control whose availability the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Advance,
    Retreat,
    Jump,
    Cancel,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Control::Advance => "advance",
            Control::Retreat => "retreat",
            Control::Jump => "jump",
            Control::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Snapshot of which controls are currently legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Availability {
    pub advance: bool,
    pub retreat: bool,
    pub jump: bool,
    pub cancel: bool,
}

impl Availability {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Advance => self.advance,
            Control::Retreat => self.retreat,
            Control::Jump => self.jump,
            Control::Cancel => self.cancel,
        }
    }

    /// Controls whose flag differs between `self` and `next`, as
    /// `(control, old, new)`, in advance / retreat / jump / cancel order.
    pub fn changes(&self, next: &Availability) -> Vec<(Control, bool, bool)> {
        [
            Control::Advance,
            Control::Retreat,
            Control::Jump,
            Control::Cancel,
        ]
        .into_iter()
        .filter_map(|control| {
            let (old, new) = (self.get(control), next.get(control));
            (old != new).then_some((control, old, new))
        })
        .collect()
    }
}
