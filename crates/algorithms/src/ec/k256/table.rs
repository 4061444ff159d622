//! Fixed-base window table for the generator G
//!
//! Row `i` holds `j * 2^(w*i) * G` for every `w`-bit digit `j`, so `k * G` is
//! a sum of one entry per row with no doublings.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::ec::k256::point::{Point, ProjectivePoint};
use crate::ec::k256::scalar::Scalar;
use crate::ec::k256::constants::K256_SCALAR_SIZE;
use dsig_params::traditional::ecdsa::SECP256K1_G_WINDOW;

const WINDOW: usize = SECP256K1_G_WINDOW;
const ROWS: usize = (K256_SCALAR_SIZE * 8).div_ceil(WINDOW);

pub(crate) struct BaseTable {
    rows: Vec<Vec<ProjectivePoint>>,
}

pub(crate) static G_TABLE: Lazy<BaseTable> = Lazy::new(|| BaseTable::build(&super::base_point_g()));

impl BaseTable {
    fn build(g: &Point) -> Self {
        let mut rows = Vec::with_capacity(ROWS);
        let mut row_base = g.to_projective();
        for _ in 0..ROWS {
            let mut row = Vec::with_capacity(1 << WINDOW);
            let mut acc = ProjectivePoint::identity();
            for _ in 0..(1usize << WINDOW) {
                row.push(acc.clone());
                acc = acc.add(&row_base);
            }
            // acc is now 2^w * row_base
            row_base = acc;
            rows.push(row);
        }
        debug!(rows = ROWS, window = WINDOW, "secp256k1 base table built");
        BaseTable { rows }
    }

    /// `k * G` as one table lookup and addition per window.
    pub(crate) fn mul(&self, k: &Scalar) -> Point {
        let mut acc = ProjectivePoint::identity();
        for (row, digit) in self.rows.iter().zip(k.windows_le(WINDOW)) {
            if digit != 0 {
                acc = acc.add(&row[digit]);
            }
        }
        acc.to_affine()
    }
}
