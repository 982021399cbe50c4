//! Video4Linux2 hardware backend (feature `v4l2`).
//!
//! Uses the `v4l` crate for node enumeration and `VIDIOC_{G,S}_CTRL`.
//!
//! Only integer-valued control kinds become [`Control`]s: integers, booleans and
//! both menu kinds (their item indices are the integer range). Buttons, control
//! classes, strings, 64-bit and compound controls are skipped, and so are
//! disabled and write-only controls since their value cannot be read.

use std::collections::BTreeMap;
use std::io;

use tracing::{debug, info};
use v4l::control::{Control as V4lControl, Description, Flags, Type, Value};

use crate::control::{Control, ControlId, ControlSet};
use crate::device::{Device, Registry};
use crate::error::{Error, Result};

/// Registry over `/dev/video*`.
#[derive(Debug, Default, Clone, Copy)]
pub struct V4l2Registry;

impl V4l2Registry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for V4l2Registry {
    fn list(&self) -> Result<BTreeMap<String, String>> {
        let nodes = v4l::context::enum_devices();
        Ok(nodes
            .into_iter()
            .map(|node| {
                let path = node.path().to_string_lossy().into_owned();
                let name = node.name().unwrap_or_else(|| path.clone());
                (path, name)
            })
            .collect())
    }

    fn open(&self, path: &str) -> Result<Box<dyn Device>> {
        let open_err = |source: io::Error| Error::Open {
            path: path.to_string(),
            source,
        };

        let handle = v4l::Device::with_path(path).map_err(open_err)?;
        let caps = handle.query_caps().map_err(open_err)?;
        let descriptions = handle.query_controls().map_err(open_err)?;

        let mut controls = ControlSet::new();
        let mut kinds = BTreeMap::new();
        for desc in descriptions {
            match classify_description(&desc) {
                Some(control) => {
                    kinds.insert(control.id(), desc.typ);
                    controls.insert(control);
                }
                None => debug!(
                    path,
                    name = %desc.name,
                    typ = %desc.typ,
                    flags = %desc.flags,
                    "skipping control"
                ),
            }
        }

        info!(path, card = %caps.card, controls = controls.len(), "opened v4l2 device");
        Ok(Box::new(V4l2Device {
            path: path.to_string(),
            name: caps.card,
            handle,
            controls,
            kinds,
        }))
    }
}

/// Turn a driver description into a [`Control`] if its kind is integer-valued
/// and its current value can be read.
fn classify_description(desc: &Description) -> Option<Control> {
    if desc.flags.intersects(Flags::DISABLED | Flags::WRITE_ONLY) {
        return None;
    }
    match desc.typ {
        Type::Integer | Type::Boolean | Type::Menu | Type::IntegerMenu => {
            Control::new(ControlId(desc.id), desc.name.clone(), desc.minimum, desc.maximum).ok()
        }
        _ => None,
    }
}

/// An open V4L2 node.
pub struct V4l2Device {
    path: String,
    name: String,
    handle: v4l::Device,
    controls: ControlSet,
    kinds: BTreeMap<ControlId, Type>,
}

impl V4l2Device {
    fn control(&self, id: ControlId) -> Result<&Control> {
        self.controls
            .get(id)
            .ok_or_else(|| Error::UnknownControl(id.to_string()))
    }
}

impl Device for V4l2Device {
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
        let read_err = |source: io::Error| Error::ControlRead {
            id,
            name: control.name().to_string(),
            source,
        };

        match self.handle.control(id.0).map_err(read_err)?.value {
            Value::Integer(v) => Ok(v),
            Value::Boolean(b) => Ok(i64::from(b)),
            other => Err(read_err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unexpected control value {other:?}"),
            ))),
        }
    }

    fn set(&mut self, id: ControlId, value: i64) -> Result<()> {
        let control = self.control(id)?;
        let (raw, written) = match self.kinds.get(&id) {
            Some(Type::Boolean) => (Value::Boolean(value != 0), i64::from(value != 0)),
            _ => (Value::Integer(value), value),
        };

        self.handle
            .set_control(V4lControl { id: id.0, value: raw })
            .map_err(|source| Error::ControlWrite {
                id,
                name: control.name().to_string(),
                value: written,
                source,
            })
    }

    fn close(self: Box<Self>) {
        info!(path = %self.path, "closed v4l2 device");
    }
}
