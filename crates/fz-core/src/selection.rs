//! # Zone Selection
//!
//! The set of zone codes a caller has chosen. Membership is unique;
//! insertion order is kept so that expanding the same selection always
//! yields the same ordered output.

use serde::{Deserialize, Serialize};

use crate::identity::ZoneCode;

/// An insertion-ordered set of zone codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ZoneCode>", into = "Vec<ZoneCode>")]
pub struct Selection {
    codes: Vec<ZoneCode>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected zones.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether `code` is selected.
    pub fn contains(&self, code: &ZoneCode) -> bool {
        self.codes.contains(code)
    }

    /// Add `code`. Returns `false` if it was already selected.
    pub fn insert(&mut self, code: ZoneCode) -> bool {
        if self.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Remove `code`. Returns `false` if it was not selected.
    pub fn remove(&mut self, code: &ZoneCode) -> bool {
        let before = self.codes.len();
        self.codes.retain(|c| c != code);
        self.codes.len() != before
    }

    /// Flip membership of `code`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, code: ZoneCode) -> bool {
        if self.remove(&code) {
            false
        } else {
            self.codes.push(code);
            true
        }
    }

    /// Add every code in one step. Returns how many were new.
    pub fn insert_all<I>(&mut self, codes: I) -> usize
    where
        I: IntoIterator<Item = ZoneCode>,
    {
        codes
            .into_iter()
            .map(|code| self.insert(code))
            .filter(|added| *added)
            .count()
    }

    /// Remove every code in one step. Returns how many were removed.
    pub fn remove_all<'a, I>(&mut self, codes: I) -> usize
    where
        I: IntoIterator<Item = &'a ZoneCode>,
    {
        let doomed: Vec<&ZoneCode> = codes.into_iter().collect();
        let before = self.codes.len();
        self.codes.retain(|c| !doomed.contains(&c));
        before - self.codes.len()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.codes.clear();
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ZoneCode> {
        self.codes.iter()
    }

    /// The codes in insertion order.
    pub fn as_slice(&self) -> &[ZoneCode] {
        &self.codes
    }
}

impl FromIterator<ZoneCode> for Selection {
    fn from_iter<I: IntoIterator<Item = ZoneCode>>(iter: I) -> Self {
        let mut selection = Selection::new();
        selection.insert_all(iter);
        selection
    }
}

impl From<Vec<ZoneCode>> for Selection {
    fn from(codes: Vec<ZoneCode>) -> Self {
        codes.into_iter().collect()
    }
}

impl From<Selection> for Vec<ZoneCode> {
    fn from(selection: Selection) -> Self {
        selection.codes
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ZoneCode;
    type IntoIter = std::slice::Iter<'a, ZoneCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
