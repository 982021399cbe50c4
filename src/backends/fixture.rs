//! In-memory fixture devices.
//!
//! A [`FixtureRegistry`] serves devices described by a [`FixtureTable`], either the
//! built-in development table ([`FixtureTable::builtin`]) or one loaded from the
//! `[fixtures]` section of the configuration file. Values live in memory and are
//! reset every time a device is opened.
//!
//! Individual controls can be told to fail reads or writes, which is how the
//! error paths of the panel are exercised without hardware.
//!
//! Device paths are `fixture:<index>` in table order.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::control::{Control, ControlId, ControlSet};
use crate::device::{Device, Registry};
use crate::error::{Error, Result};

/// First identifier handed out to fixture controls without an explicit `id`.
///
/// Matches `V4L2_CID_BASE` so fixture ids look like real user-class controls.
pub const FIXTURE_CID_BASE: u32 = 0x0098_0900;

const PATH_PREFIX: &str = "fixture:";

/// A table of fixture devices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureTable {
    #[serde(default)]
    pub devices: Vec<FixtureDeviceSpec>,
}

/// One fixture device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDeviceSpec {
    pub name: String,
    #[serde(default)]
    pub controls: Vec<FixtureControlSpec>,
}

/// One fixture control and its initial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureControlSpec {
    /// Explicit identifier; defaults to `FIXTURE_CID_BASE + position`.
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub min: i64,
    pub max: i64,
    /// Initial value; defaults to `min`. Out-of-range values are clamped.
    #[serde(default)]
    pub value: Option<i64>,
    /// Every read of this control fails.
    #[serde(default)]
    pub fail_read: bool,
    /// Every write to this control fails.
    #[serde(default)]
    pub fail_write: bool,
}

impl FixtureControlSpec {
    pub fn new(name: &str, min: i64, max: i64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            min,
            max,
            value: None,
            fail_read: false,
            fail_write: false,
        }
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

impl FixtureTable {
    /// The development table: a plain test device and a webcam with a boolean
    /// and a categorical control.
    pub fn builtin() -> Self {
        Self {
            devices: vec![
                FixtureDeviceSpec {
                    name: "TestDevice".into(),
                    controls: vec![FixtureControlSpec::new("Brightness", 0, 100).with_value(50)],
                },
                FixtureDeviceSpec {
                    name: "FancyWebcam".into(),
                    controls: vec![
                        FixtureControlSpec::new("Brightness", 0, 100).with_value(40),
                        FixtureControlSpec::new("Brightness (Auto)", 0, 1).with_value(0),
                        FixtureControlSpec::new("Power Line Frequency", 0, 2).with_value(1),
                    ],
                },
            ],
        }
    }
}

/// Registry over a [`FixtureTable`].
#[derive(Debug, Clone, Default)]
pub struct FixtureRegistry {
    table: FixtureTable,
}

impl FixtureRegistry {
    pub fn new(table: FixtureTable) -> Self {
        Self { table }
    }

    pub fn builtin() -> Self {
        Self::new(FixtureTable::builtin())
    }

    fn index_of(path: &str) -> Option<usize> {
        path.strip_prefix(PATH_PREFIX)?.parse().ok()
    }
}

impl Registry for FixtureRegistry {
    fn list(&self) -> Result<BTreeMap<String, String>> {
        Ok(self
            .table
            .devices
            .iter()
            .enumerate()
            .map(|(i, dev)| (format!("{PATH_PREFIX}{i}"), dev.name.clone()))
            .collect())
    }

    fn open(&self, path: &str) -> Result<Box<dyn Device>> {
        let spec = Self::index_of(path)
            .and_then(|i| self.table.devices.get(i))
            .ok_or_else(|| Error::Open {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such fixture device"),
            })?;

        let mut device = FixtureDevice::new(path, &spec.name);
        for (pos, ctl) in spec.controls.iter().enumerate() {
            let id = ControlId(ctl.id.unwrap_or(FIXTURE_CID_BASE + pos as u32));
            if let Some(existing) = device.controls.get(id) {
                return Err(Error::DuplicateControl {
                    id,
                    first: existing.name().to_string(),
                    second: ctl.name.clone(),
                });
            }
            let control = Control::new(id, ctl.name.clone(), ctl.min, ctl.max)?;
            let value = control.clamp(ctl.value.unwrap_or(ctl.min));
            device.add_control(control, value);
            if ctl.fail_read {
                device.fail_reads(id);
            }
            if ctl.fail_write {
                device.fail_writes(id);
            }
        }

        debug!(path, name = %spec.name, controls = device.controls.len(), "opened fixture device");
        Ok(Box::new(device))
    }
}

/// An in-memory device.
#[derive(Debug, Default)]
pub struct FixtureDevice {
    path: String,
    name: String,
    controls: ControlSet,
    values: HashMap<ControlId, i64>,
    failing_reads: HashSet<ControlId>,
    failing_writes: HashSet<ControlId>,
}

impl FixtureDevice {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add a control holding `value`.
    pub fn add_control(&mut self, control: Control, value: i64) {
        self.values.insert(control.id(), value);
        self.controls.insert(control);
    }

    /// Make every read of `id` fail.
    pub fn fail_reads(&mut self, id: ControlId) {
        self.failing_reads.insert(id);
    }

    /// Make every write to `id` fail.
    pub fn fail_writes(&mut self, id: ControlId) {
        self.failing_writes.insert(id);
    }

    fn control(&self, id: ControlId) -> Result<&Control> {
        self.controls
            .get(id)
            .ok_or_else(|| Error::UnknownControl(id.to_string()))
    }
}

impl Device for FixtureDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn controls(&self) -> &ControlSet {
        &self.controls
    }

    fn get(&self, id: ControlId) -> Result<i64> {
        let control = self.control(id)?;
        if self.failing_reads.contains(&id) {
            return Err(Error::ControlRead {
                id,
                name: control.name().to_string(),
                source: io::Error::new(io::ErrorKind::Other, "injected read failure"),
            });
        }
        Ok(self.values.get(&id).copied().unwrap_or(control.minimum()))
    }

    fn set(&mut self, id: ControlId, value: i64) -> Result<()> {
        let control = self.control(id)?;
        let reason = if self.failing_writes.contains(&id) {
            Some((io::ErrorKind::Other, "injected write failure"))
        } else if !control.contains(value) {
            // Drivers answer ERANGE; the fixture reports the same class of error.
            Some((io::ErrorKind::InvalidInput, "value out of range"))
        } else {
            None
        };

        if let Some((kind, msg)) = reason {
            return Err(Error::ControlWrite {
                id,
                name: control.name().to_string(),
                value,
                source: io::Error::new(kind, msg),
            });
        }

        self.values.insert(id, value);
        Ok(())
    }

    fn close(self: Box<Self>) {
        debug!(path = %self.path, "closed fixture device");
    }
}
