//! # Price Matrix
//!
//! The square zone-to-zone matrix handed to the pricing editor. Rows and
//! columns are the confirmed zone codes; every ordered pair, self-pairs
//! included, has exactly one cell and no other cells exist.
//!
//! ```text
//!          to E1   to NE1  to X1
//! from E1    ""      ""      ""
//! from NE1   ""      ""      ""
//! from X1    ""      ""      ""
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fz_core::{ZoneCode, ZoneConfig};

/// Origin zone → destination zone → cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMatrix<V> {
    cells: BTreeMap<ZoneCode, BTreeMap<ZoneCode, V>>,
}

impl<V: Clone> PriceMatrix<V> {
    /// A matrix over `codes` with every cell set to `blank`.
    pub fn blank(codes: &[ZoneCode], blank: &V) -> Self {
        let cells = codes
            .iter()
            .map(|from| {
                let row = codes.iter().map(|to| (to.clone(), blank.clone())).collect();
                (from.clone(), row)
            })
            .collect();
        Self { cells }
    }
}

impl<V> PriceMatrix<V> {
    /// The cell for the pair `(from, to)`.
    pub fn get(&self, from: &ZoneCode, to: &ZoneCode) -> Option<&V> {
        self.cells.get(from).and_then(|row| row.get(to))
    }

    /// Overwrite an existing cell. Pairs outside the matrix are refused.
    pub fn set(&mut self, from: &ZoneCode, to: &ZoneCode, value: V) -> bool {
        match self.cells.get_mut(from).and_then(|row| row.get_mut(to)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Zone codes spanning the matrix, in code order.
    pub fn codes(&self) -> impl Iterator<Item = &ZoneCode> + '_ {
        self.cells.keys()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Every `(from, to, value)` triple.
    pub fn cells(&self) -> impl Iterator<Item = (&ZoneCode, &ZoneCode, &V)> + '_ {
        self.cells
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(to, value)| (from, to, value)))
    }

    /// Whether the matrix has no zones.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The confirmed zone setup delivered to the completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSetup<V> {
    /// Expanded zones, in selection order.
    pub zones: Vec<ZoneConfig>,
    /// Blank price matrix over the zones.
    pub price_matrix: PriceMatrix<V>,
}

impl<V: Clone> ZoneSetup<V> {
    /// Build the setup for `zones` with every price cell set to `blank`.
    pub fn new(zones: Vec<ZoneConfig>, blank: &V) -> Self {
        let codes: Vec<ZoneCode> = zones.iter().map(|z| z.zone_code.clone()).collect();
        let price_matrix = PriceMatrix::blank(&codes, blank);
        Self { zones, price_matrix }
    }
}
