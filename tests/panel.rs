//! End-to-end behavior of the control panel over fixture devices.

use camctl::backends::fixture::FixtureRegistry;
use camctl::backends::probe_registry;
use camctl::config::Settings;
use camctl::{Change, Error, Manager, Widget, WidgetKind};

const BENCH: &str = r#"
use_fixtures = true

[[fixtures.devices]]
name = "Bench Cam"

[[fixtures.devices.controls]]
name = "Exposure"
min = 1
max = 5000
value = 250

[[fixtures.devices.controls]]
name = "Focus (Auto)"
min = 0
max = 1
value = 1
fail_write = true

[[fixtures.devices.controls]]
name = "Scene Mode"
min = 0
max = 3
value = 3
"#;

fn bench() -> Manager {
    let settings = Settings::from_toml(BENCH).unwrap();
    let registry = probe_registry(&settings).unwrap();
    Manager::open(registry.as_ref()).unwrap()
}

fn control_id(manager: &Manager, tab: usize, name: &str) -> camctl::ControlId {
    manager.layout(tab).unwrap().find(name).unwrap().control().id()
}

#[test]
fn brightness_slider_clamps_overshoot_to_max() {
    let mut manager = Manager::open(&FixtureRegistry::builtin()).unwrap();
    let id = control_id(&manager, 1, "Brightness");

    let before = manager.snapshot();
    assert_eq!(before[1].get("Brightness").unwrap().widget.display_value(), "40");

    assert_eq!(manager.dispatch(1, id, Change::Slid(150.0)).unwrap(), 100);

    let after = manager.snapshot();
    let view = after[1].get("Brightness").unwrap();
    assert_eq!(view.widget.display_value(), "100");
    assert_eq!(view.caption.as_deref(), Some("Brightness"));
}

#[test]
fn checking_the_auto_toggle_writes_one() {
    let mut manager = Manager::open(&FixtureRegistry::builtin()).unwrap();
    let id = control_id(&manager, 1, "Brightness (Auto)");

    assert_eq!(
        manager.snapshot()[1].get("Brightness (Auto)").unwrap().widget,
        Widget::Toggle {
            label: "Brightness (Auto)".into(),
            checked: false,
        }
    );
    assert_eq!(manager.dispatch(1, id, Change::Toggled(true)).unwrap(), 1);
}

#[test]
fn configured_table_is_laid_out_by_domain_size() {
    let manager = bench();
    let snap = &manager.snapshot()[0];

    let kinds: Vec<_> = snap.controls.iter().map(|c| c.widget.kind()).collect();
    assert_eq!(
        kinds,
        vec![WidgetKind::Slider, WidgetKind::Toggle, WidgetKind::Choice]
    );
    assert_eq!(
        snap.get("Scene Mode").unwrap().widget,
        Widget::Choice {
            options: vec!["0".into(), "1".into(), "2".into(), "3".into()],
            selected: "3".into(),
        }
    );
    assert_eq!(snap.get("Focus (Auto)").unwrap().widget.display_value(), "on");
}

#[test]
fn failed_write_is_reported_but_not_rolled_back() {
    let mut manager = bench();
    let id = control_id(&manager, 0, "Focus (Auto)");

    let err = manager.dispatch(0, id, Change::Toggled(false)).unwrap_err();

    assert!(matches!(err, Error::ControlWrite { value: 0, .. }));
    let snap = &manager.snapshot()[0];
    assert_eq!(snap.get("Focus (Auto)").unwrap().widget.display_value(), "off");

    // The panel stays usable after the failure.
    let exposure = control_id(&manager, 0, "Exposure");
    assert_eq!(manager.dispatch(0, exposure, Change::Slid(0.2)).unwrap(), 1);
}

#[test]
fn unreadable_control_aborts_opening_the_panel() {
    let settings = Settings::from_toml(
        r#"
        use_fixtures = true

        [[fixtures.devices]]
        name = "Good Cam"
        [[fixtures.devices.controls]]
        name = "Gain"
        min = 0
        max = 255

        [[fixtures.devices]]
        name = "Broken Cam"
        [[fixtures.devices.controls]]
        name = "Gain"
        min = 0
        max = 255
        fail_read = true
        "#,
    )
    .unwrap();
    let registry = probe_registry(&settings).unwrap();

    match Manager::open(registry.as_ref()) {
        Err(Error::ControlRead { name, .. }) => assert_eq!(name, "Gain"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("panel opened despite an unreadable control"),
    }
}

#[test]
fn configured_control_ids_must_be_unique_per_device() {
    let settings = Settings::from_toml(
        r#"
        use_fixtures = true

        [[fixtures.devices]]
        name = "Bench Cam"
        [[fixtures.devices.controls]]
        name = "Brightness"
        min = 0
        max = 100
        [[fixtures.devices.controls]]
        name = "Zoom"
        id = 9963776
        min = 100
        max = 500
        "#,
    )
    .unwrap();
    let registry = probe_registry(&settings).unwrap();

    match Manager::open(registry.as_ref()) {
        Err(Error::DuplicateControl { first, second, .. }) => {
            assert_eq!(first, "Brightness");
            assert_eq!(second, "Zoom");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(manager) => panic!(
            "panel opened with controls {:?}",
            manager.snapshot()[0].controls.iter().map(|c| &c.name).collect::<Vec<_>>()
        ),
    }
}

#[test]
fn open_one_resolves_names_and_rejects_unknown_devices() {
    let registry = FixtureRegistry::builtin();

    let manager = Manager::open_one(&registry, "TestDevice").unwrap();
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.layout(0).unwrap().path(), "fixture:0");

    assert!(matches!(
        Manager::open_one(&registry, "Missing Cam"),
        Err(Error::UnknownDevice(_))
    ));
}

#[test]
fn scripted_changes_go_through_the_same_handlers() {
    let mut manager = Manager::open_one(&FixtureRegistry::builtin(), "FancyWebcam").unwrap();
    let binding = manager.layout(0).unwrap().find("power line frequency").unwrap();
    let id = binding.control().id();

    let change = Change::parse(binding.widget().kind(), "2").unwrap();
    assert_eq!(manager.dispatch(0, id, change).unwrap(), 2);

    let bogus = Change::parse(WidgetKind::Choice, "9").unwrap();
    assert!(matches!(
        manager.dispatch(0, id, bogus),
        Err(Error::InvalidChange { .. })
    ));
    assert_eq!(
        manager.snapshot()[0].get("Power Line Frequency").unwrap().widget.display_value(),
        "2"
    );
    manager.close();
}
