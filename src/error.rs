//! Error type shared by the registry, the widget builder and the sync handlers.
//!
//! Errors fall into three groups that callers treat differently:
//! - **startup** ([`Error::Open`], [`Error::ControlRead`], [`Error::DuplicateControl`],
//!   [`Error::InvalidRange`], [`Error::Config`], [`Error::BackendUnavailable`]): fatal,
//!   the panel is not shown.
//! - **interaction** ([`Error::ControlWrite`], [`Error::InvalidChange`]): logged and
//!   reported; the panel stays up. See [`Error::is_interaction`].
//! - **lookups** ([`Error::UnknownDevice`], [`Error::UnknownControl`]): a name or id
//!   that does not exist, rejected before any device I/O.

use std::io;
use std::path::PathBuf;

use crate::control::ControlId;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A listed device could not be opened.
    #[error("failed to open device `{path}`")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No device with this path (or name) exists in the registry.
    #[error("unknown device `{0}`")]
    UnknownDevice(String),

    /// No control with this identifier or name exists on the device.
    #[error("unknown control `{0}`")]
    UnknownControl(String),

    /// Reading a control's current value failed while building its widget.
    #[error("failed to read control `{name}` ({id})")]
    ControlRead {
        id: ControlId,
        name: String,
        #[source]
        source: io::Error,
    },

    /// Writing a control value to the device failed.
    #[error("failed to write {value} to control `{name}` ({id})")]
    ControlWrite {
        id: ControlId,
        name: String,
        value: i64,
        #[source]
        source: io::Error,
    },

    /// Two controls of one device share an identifier.
    #[error("controls `{first}` and `{second}` share id {id}")]
    DuplicateControl {
        id: ControlId,
        first: String,
        second: String,
    },

    /// A control was declared with `minimum > maximum`.
    #[error("control `{name}` has an empty range [{minimum}, {maximum}]")]
    InvalidRange {
        name: String,
        minimum: i64,
        maximum: i64,
    },

    /// A widget change payload could not be turned into a device value.
    #[error("invalid change for control `{name}`: {reason}")]
    InvalidChange { name: String, reason: String },

    /// The configuration file could not be read.
    #[error("failed to read config file `{}`", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`Settings`](crate::config::Settings).
    #[error("failed to parse config")]
    Config(#[from] toml::de::Error),

    /// The configuration asks for a backend this build does not include.
    #[error("backend `{0}` is not available in this build")]
    BackendUnavailable(&'static str),
}

impl Error {
    /// `true` for errors caused by one user change. Front ends report these
    /// to the user and keep the panel running.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            Error::ControlWrite { .. } | Error::InvalidChange { .. }
        )
    }
}
