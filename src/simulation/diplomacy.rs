use serde::{Deserialize, Serialize};

use crate::simulation::{CountryId, TABLE_WIDTH};

pub const AFFINITY_MIN: i64 = -127;
pub const AFFINITY_MAX: i64 = 127;
pub const SELF_AFFINITY: i8 = 127;

/// Symmetric affinity table over every country pair.
///
/// Each write goes through [`DiplomaticMatrix::set`], which clamps the value
/// and mirrors it, so `get(a, b) == get(b, a)` holds after any sequence of
/// writes. The diagonal is pinned at 127.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiplomaticMatrix {
    cells: Vec<i8>,
}

impl Default for DiplomaticMatrix {
    fn default() -> Self {
        let mut matrix = Self {
            cells: vec![0; TABLE_WIDTH * TABLE_WIDTH],
        };
        for i in 0..TABLE_WIDTH {
            matrix.cells[i * TABLE_WIDTH + i] = SELF_AFFINITY;
        }
        matrix
    }
}

impl DiplomaticMatrix {
    fn offset(a: usize, b: usize) -> usize {
        a * TABLE_WIDTH + b
    }

    pub fn get(&self, a: CountryId, b: CountryId) -> i64 {
        i64::from(self.cells[Self::offset(a.index(), b.index())])
    }

    pub fn set(&mut self, a: CountryId, b: CountryId, value: i64) {
        if a == b {
            return;
        }
        let clamped = value.clamp(AFFINITY_MIN, AFFINITY_MAX) as i8;
        self.cells[Self::offset(a.index(), b.index())] = clamped;
        self.cells[Self::offset(b.index(), a.index())] = clamped;
    }

    pub fn adjust(&mut self, a: CountryId, b: CountryId, delta: i64) {
        let current = self.get(a, b);
        self.set(a, b, current.saturating_add(delta));
    }

    pub fn has_valid_shape(&self) -> bool {
        self.cells.len() == TABLE_WIDTH * TABLE_WIDTH
    }

    /// True when the table is symmetric, in range, and has a 127 diagonal.
    pub fn is_consistent(&self) -> bool {
        if !self.has_valid_shape() {
            return false;
        }
        for a in 0..TABLE_WIDTH {
            if self.cells[Self::offset(a, a)] != SELF_AFFINITY {
                return false;
            }
            for b in (a + 1)..TABLE_WIDTH {
                let forward = self.cells[Self::offset(a, b)];
                if forward != self.cells[Self::offset(b, a)] || i64::from(forward) < AFFINITY_MIN {
                    return false;
                }
            }
        }
        true
    }

    /// Mirrors the upper triangle onto the lower one and restores the
    /// diagonal. Returns the number of cells that changed.
    pub fn repair(&mut self) -> usize {
        let mut changed = 0;
        for a in 0..TABLE_WIDTH {
            let diag = Self::offset(a, a);
            if self.cells[diag] != SELF_AFFINITY {
                self.cells[diag] = SELF_AFFINITY;
                changed += 1;
            }
            for b in (a + 1)..TABLE_WIDTH {
                let upper = self.cells[Self::offset(a, b)].max(AFFINITY_MIN as i8);
                if self.cells[Self::offset(a, b)] != upper {
                    self.cells[Self::offset(a, b)] = upper;
                    changed += 1;
                }
                if self.cells[Self::offset(b, a)] != upper {
                    self.cells[Self::offset(b, a)] = upper;
                    changed += 1;
                }
            }
        }
        changed
    }
}
