//! Control classification and widget construction.
//!
//! The widget shape for a control is decided by its domain size alone:
//!
//! | domain size | widget |
//! |-------------|--------|
//! | 2           | [`Widget::Toggle`], checked iff the value is the maximum |
//! | 3 or 4      | [`Widget::Choice`], one option per legal value |
//! | anything else | [`Widget::Slider`] with a value label |
//!
//! There is no notion of "this is really a boolean" or "this is a menu" beyond
//! the numeric span, so a continuous control with three steps becomes a choice
//! group.
//!
//! Widgets here are toolkit-independent state. A front end renders them and
//! feeds user changes back through [`ControlBinding`](crate::binding::ControlBinding).

use serde::Serialize;
use tracing::debug;

use crate::control::Control;
use crate::device::Device;
use crate::error::Result;

/// Widget shape chosen for a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Toggle,
    Choice,
    Slider,
}

impl WidgetKind {
    /// Classify a control by its domain size.
    pub fn classify(control: &Control) -> Self {
        match control.domain_size() {
            2 => WidgetKind::Toggle,
            3 | 4 => WidgetKind::Choice,
            _ => WidgetKind::Slider,
        }
    }
}

/// On-screen state of one control's interactive element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Widget {
    /// Boolean toggle; `label` is the control name.
    Toggle { label: String, checked: bool },
    /// Exclusive choice group. `options` are the decimal strings of every legal
    /// value, ascending.
    Choice {
        options: Vec<String>,
        selected: String,
    },
    /// Slider over `[min, max]` with a label showing the last integer value.
    Slider {
        min: f64,
        max: f64,
        position: f64,
        value_label: String,
    },
}

impl Widget {
    /// Build the widget for `control` showing `current`.
    pub fn build(control: &Control, current: i64) -> Self {
        let kind = WidgetKind::classify(control);
        debug!(control = control.name(), ?kind, current, "building widget");

        match kind {
            WidgetKind::Toggle => Widget::Toggle {
                label: control.name().to_string(),
                checked: current == control.maximum(),
            },
            WidgetKind::Choice => Widget::Choice {
                options: control.values().map(|v| v.to_string()).collect(),
                selected: current.to_string(),
            },
            WidgetKind::Slider => Widget::Slider {
                min: control.minimum() as f64,
                max: control.maximum() as f64,
                position: current as f64,
                value_label: current.to_string(),
            },
        }
    }

    /// Read the control's current value from `device` and build its widget.
    ///
    /// A failed read fails the build; no widget is produced.
    pub fn load(control: &Control, device: &dyn Device) -> Result<Self> {
        let current = device.get(control.id())?;
        Ok(Self::build(control, current))
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Toggle { .. } => WidgetKind::Toggle,
            Widget::Choice { .. } => WidgetKind::Choice,
            Widget::Slider { .. } => WidgetKind::Slider,
        }
    }

    /// Short text form of what the widget currently displays.
    pub fn display_value(&self) -> String {
        match self {
            Widget::Toggle { checked, .. } => (if *checked { "on" } else { "off" }).to_string(),
            Widget::Choice { selected, .. } => selected.clone(),
            Widget::Slider { value_label, .. } => value_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlId;
    use proptest::prelude::*;

    fn control(min: i64, max: i64) -> Control {
        Control::new(ControlId(1), "Test", min, max).unwrap()
    }

    #[test]
    fn brightness_becomes_a_slider() {
        let c = Control::new(ControlId(1), "Brightness", 0, 100).unwrap();
        assert_eq!(
            Widget::build(&c, 40),
            Widget::Slider {
                min: 0.0,
                max: 100.0,
                position: 40.0,
                value_label: "40".into(),
            }
        );
    }

    #[test]
    fn two_value_control_becomes_an_unchecked_toggle() {
        let c = Control::new(ControlId(2), "Brightness (Auto)", 0, 1).unwrap();
        assert_eq!(
            Widget::build(&c, 0),
            Widget::Toggle {
                label: "Brightness (Auto)".into(),
                checked: false,
            }
        );
    }

    #[test]
    fn categorical_control_becomes_a_choice_group() {
        let c = Control::new(ControlId(3), "Some categorical control", 0, 2).unwrap();
        assert_eq!(
            Widget::build(&c, 1),
            Widget::Choice {
                options: vec!["0".into(), "1".into(), "2".into()],
                selected: "1".into(),
            }
        );
    }

    #[test]
    fn degenerate_and_wide_ranges_are_sliders() {
        assert_eq!(WidgetKind::classify(&control(7, 7)), WidgetKind::Slider);
        assert_eq!(WidgetKind::classify(&control(0, 4)), WidgetKind::Slider);
        assert_eq!(WidgetKind::classify(&control(-2, 1)), WidgetKind::Choice);
        assert_eq!(
            WidgetKind::classify(&control(i64::MIN, i64::MAX)),
            WidgetKind::Slider
        );
    }

    #[test]
    fn display_value_follows_the_shape() {
        assert_eq!(Widget::build(&control(0, 1), 1).display_value(), "on");
        assert_eq!(Widget::build(&control(1, 3), 2).display_value(), "2");
        assert_eq!(Widget::build(&control(0, 255), 128).display_value(), "128");
    }

    proptest! {
        #[test]
        fn toggles_are_checked_exactly_at_max(min in -1000i64..1000, at_max in any::<bool>()) {
            let c = control(min, min + 1);
            let current = if at_max { min + 1 } else { min };
            prop_assert_eq!(
                Widget::build(&c, current),
                Widget::Toggle { label: "Test".into(), checked: at_max }
            );
        }

        #[test]
        fn choices_list_every_value(min in -1000i64..1000, extra in 2i64..=3, offset in 0i64..4) {
            let c = control(min, min + extra);
            let current = min + offset.min(extra);
            match Widget::build(&c, current) {
                Widget::Choice { options, selected } => {
                    prop_assert_eq!(options.len() as i64, extra + 1);
                    let expected: Vec<String> = (min..=min + extra).map(|v| v.to_string()).collect();
                    prop_assert_eq!(options, expected);
                    prop_assert_eq!(selected, current.to_string());
                }
                other => prop_assert!(false, "expected choice, got {:?}", other),
            }
        }

        #[test]
        fn wide_controls_start_at_current(min in -10_000i64..10_000, span in 4i64..10_000, frac in 0.0f64..=1.0) {
            let c = control(min, min + span);
            let current = min + (span as f64 * frac) as i64;
            match Widget::build(&c, current) {
                Widget::Slider { min: lo, max: hi, position, value_label } => {
                    prop_assert_eq!(lo, min as f64);
                    prop_assert_eq!(hi, (min + span) as f64);
                    prop_assert_eq!(position, current as f64);
                    prop_assert_eq!(value_label, current.to_string());
                }
                other => prop_assert!(false, "expected slider, got {:?}", other),
            }
        }
    }
}
