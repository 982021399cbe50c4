//! Owned, read-only view of a device layout.
//!
//! [`Snapshot`] captures what a panel tab shows at a point in time: the device,
//! and for each control its range, caption and widget state. It is what headless
//! front ends print, either as text (its [`Display`](std::fmt::Display) impl) or
//! as JSON (it is [`Serialize`]).
//!
//! A snapshot does not touch the device. It reflects the widgets' last state,
//! which after a failed write is what the user set, not what the device holds.
//!
//! # Example
//! ```
//! use camctl::backends::fixture::FixtureRegistry;
//! use camctl::Manager;
//!
//! let manager = Manager::open(&FixtureRegistry::builtin()).unwrap();
//! for snap in manager.snapshot() {
//!     println!("{snap}");
//! }
//! ```

use std::fmt;

use serde::Serialize;

use crate::control::ControlId;
use crate::layout::DeviceLayout;
use crate::widget::Widget;

/// Snapshot of one device tab.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub device: String,
    pub path: String,
    pub controls: Vec<ControlView>,
}

/// One control as displayed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlView {
    pub id: ControlId,
    pub name: String,
    pub min: i64,
    pub max: i64,
    /// Static label shown before the widget, absent for toggles.
    pub caption: Option<String>,
    pub widget: Widget,
}

impl Snapshot {
    /// Look up a control by name (ASCII case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ControlView> {
        self.controls
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl From<&DeviceLayout> for Snapshot {
    fn from(layout: &DeviceLayout) -> Self {
        Self {
            device: layout.device_name().to_string(),
            path: layout.path().to_string(),
            controls: layout
                .bindings()
                .iter()
                .map(|b| ControlView {
                    id: b.control().id(),
                    name: b.control().name().to_string(),
                    min: b.control().minimum(),
                    max: b.control().maximum(),
                    caption: b.caption().map(str::to_string),
                    widget: b.widget().clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ControlView {
    /// One line per control, shaped like the widget it stands for.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(caption) = &self.caption {
            write!(f, "{caption}: ")?;
        }
        match &self.widget {
            Widget::Toggle { label, checked } => {
                write!(f, "[{}] {label}", if *checked { "x" } else { " " })
            }
            Widget::Choice { options, selected } => {
                let parts: Vec<String> = options
                    .iter()
                    .map(|o| {
                        let mark = if o == selected { "(*)" } else { "( )" };
                        format!("{mark} {o}")
                    })
                    .collect();
                write!(f, "{}", parts.join("  "))
            }
            Widget::Slider {
                min,
                max,
                value_label,
                ..
            } => write!(f, "<{min} .. {max}> {value_label}"),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ({}) ==", self.device, self.path)?;
        if self.controls.is_empty() {
            writeln!(f, "  (no controls)")?;
        }
        for control in &self.controls {
            writeln!(f, "  {control}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::fixture::FixtureRegistry;
    use crate::device::Registry;

    fn fancy() -> Snapshot {
        let device = FixtureRegistry::builtin().open("fixture:1").unwrap();
        let layout = DeviceLayout::build(device.as_ref()).unwrap();
        Snapshot::from(&layout)
    }

    #[test]
    fn text_form_mirrors_the_widgets() {
        let text = fancy().to_string();
        assert_eq!(
            text,
            "== FancyWebcam (fixture:1) ==\n\
             \x20 Brightness: <0 .. 100> 40\n\
             \x20 [ ] Brightness (Auto)\n\
             \x20 Power Line Frequency: ( ) 0  (*) 1  ( ) 2\n"
        );
    }

    #[test]
    fn json_form_tags_widget_kinds() {
        let json = serde_json::to_value(fancy()).unwrap();
        let controls = json["controls"].as_array().unwrap();
        assert_eq!(controls[0]["widget"]["kind"], "slider");
        assert_eq!(controls[1]["widget"]["kind"], "toggle");
        assert_eq!(controls[1]["caption"], serde_json::Value::Null);
        assert_eq!(controls[2]["widget"]["selected"], "1");
        assert_eq!(json["device"], "FancyWebcam");
    }

    #[test]
    fn get_is_case_insensitive() {
        let snap = fancy();
        assert_eq!(snap.get("brightness (auto)").map(|c| c.max), Some(1));
        assert!(snap.get("zoom").is_none());
    }
}
