//! Hardware controls.
//!
//! A [`Control`] is a named, integer-ranged setting exposed by a device
//! (brightness, exposure, power line frequency, ...). Only the declared range is
//! kept here; the *current* value always lives on the device and is read on
//! demand.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque control identifier, meaningful only to the device that reported it.
///
/// For V4L2 devices this is the `V4L2_CID_*` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlId(pub u32);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Declared shape of a device control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    id: ControlId,
    name: String,
    minimum: i64,
    maximum: i64,
}

impl Control {
    /// Create a control, rejecting inverted ranges.
    pub fn new(id: ControlId, name: impl Into<String>, minimum: i64, maximum: i64) -> Result<Self> {
        let name = name.into();
        if minimum > maximum {
            return Err(Error::InvalidRange {
                name,
                minimum,
                maximum,
            });
        }
        Ok(Self {
            id,
            name,
            minimum,
            maximum,
        })
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Inclusive upper bound.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Number of legal values, `maximum - minimum + 1`.
    ///
    /// Saturates at `u64::MAX` for the full `i64` span.
    pub fn domain_size(&self) -> u64 {
        let span = i128::from(self.maximum) - i128::from(self.minimum) + 1;
        u64::try_from(span).unwrap_or(u64::MAX)
    }

    /// Whether `value` is a legal value for this control.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }

    /// Clamp `value` into `[minimum, maximum]`.
    #[inline]
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.minimum, self.maximum)
    }

    /// Every legal value in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> {
        self.minimum..=self.maximum
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..={}] ({})",
            self.name, self.minimum, self.maximum, self.id
        )
    }
}

/// Controls of one device, keyed by identifier.
///
/// Fetched once when the device is opened and immutable afterwards. Iteration
/// order is ascending by [`ControlId`], which is also the order widgets are laid
/// out in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSet(BTreeMap<ControlId, Control>);

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a control, replacing any earlier control with the same id.
    pub fn insert(&mut self, control: Control) -> Option<Control> {
        self.0.insert(control.id(), control)
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.0.get(&id)
    }

    /// Look up a control by display name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&Control> {
        self.0.values().find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        let mut set = ControlSet::new();
        for control in iter {
            set.insert(control);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness() -> Control {
        Control::new(ControlId(0x0098_0900), "Brightness", 0, 100).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Control::new(ControlId(1), "Broken", 5, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { minimum: 5, maximum: 4, .. }));
    }

    #[test]
    fn domain_size_counts_both_bounds() {
        assert_eq!(brightness().domain_size(), 101);
        let single = Control::new(ControlId(2), "Fixed", 3, 3).unwrap();
        assert_eq!(single.domain_size(), 1);
        let full = Control::new(ControlId(3), "Huge", i64::MIN, i64::MAX).unwrap();
        assert_eq!(full.domain_size(), u64::MAX);
    }

    #[test]
    fn clamp_and_contains_agree_on_bounds() {
        let c = brightness();
        assert_eq!(c.clamp(-1), 0);
        assert_eq!(c.clamp(101), 100);
        assert_eq!(c.clamp(42), 42);
        assert!(c.contains(0) && c.contains(100));
        assert!(!c.contains(-1) && !c.contains(101));
    }

    #[test]
    fn set_iterates_by_id_and_finds_names_case_insensitively() {
        let set: ControlSet = [
            Control::new(ControlId(9), "Gain", 0, 255).unwrap(),
            Control::new(ControlId(3), "Brightness (Auto)", 0, 1).unwrap(),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = set.iter().map(Control::id).collect();
        assert_eq!(ids, vec![ControlId(3), ControlId(9)]);
        assert_eq!(set.find_by_name("gain").map(Control::id), Some(ControlId(9)));
        assert!(set.find_by_name("exposure").is_none());
    }

    #[test]
    fn id_displays_as_hex() {
        assert_eq!(ControlId(0x0098_0900).to_string(), "0x00980900");
    }
}
