use nalgebra::{DMatrix, SymmetricEigen};
use std::collections::HashMap;

/// A sparse real symmetric matrix builder for the electronic Hamiltonian.
///
/// Only the upper triangle is stored; reads mirror across the diagonal.
/// On a dilute grid most rows are structurally empty, so the eigensystem
/// first compacts away empty rows and columns before handing a dense matrix
/// to the eigensolver, then re-inflates the eigenvectors.
#[derive(Clone, Debug)]
pub struct SymmetricMatrix {
    size: usize,
    // Keys are (row, col) with row <= col. Zero values are never stored.
    entries: HashMap<(usize, usize), f64>,
}

impl SymmetricMatrix {
    /// A zeroed `size` by `size` symmetric matrix.
    pub fn new(size: usize) -> Self {
        SymmetricMatrix {
            size,
            entries: HashMap::new(),
        }
    }

    /// Edge length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    fn key(&self, i: usize, j: usize) -> (usize, usize) {
        assert!(
            i < self.size && j < self.size,
            "matrix access ({}, {}) out of bounds for size {}",
            i,
            j,
            self.size
        );
        if i <= j {
            (i, j)
        } else {
            (j, i)
        }
    }

    /// Value at row `i`, column `j`. Panics if out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries.get(&self.key(i, j)).copied().unwrap_or(0.0)
    }

    /// Set the value at `(i, j)` and its mirror. Panics if out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let key = self.key(i, j);
        if value == 0.0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    /// Accumulate into the value at `(i, j)`. The Hamiltonian builder adds
    /// each bond term from both endpoints, so hopping amplitudes carry a
    /// factor of 1/2.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        let key = self.key(i, j);
        let updated = self.entries.get(&key).copied().unwrap_or(0.0) + value;
        if updated == 0.0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, updated);
        }
    }

    /// Number of stored (structurally nonzero) upper-triangle entries.
    pub fn stored_entries(&self) -> usize {
        self.entries.len()
    }

    // Original indices of rows holding at least one nonzero entry, ascending.
    fn occupied_rows(&self) -> Vec<usize> {
        let mut occupied = vec![false; self.size];
        for &(i, j) in self.entries.keys() {
            occupied[i] = true;
            occupied[j] = true;
        }
        occupied
            .iter()
            .enumerate()
            .filter_map(|(i, &used)| used.then_some(i))
            .collect()
    }

    /// Drop structurally empty rows and columns. Returns the compacted
    /// matrix and the map from compact indices back to original indices.
    pub fn remove_empty_rows(&self) -> (SymmetricMatrix, Vec<usize>) {
        let convert = self.occupied_rows();
        let mut compact = SymmetricMatrix::new(convert.len());
        for (ci, &oi) in convert.iter().enumerate() {
            for (cj, &oj) in convert.iter().enumerate().skip(ci) {
                let value = self.get(oi, oj);
                if value != 0.0 {
                    compact.set(ci, cj, value);
                }
            }
        }
        (compact, convert)
    }

    /// Inverse of [`remove_empty_rows`](Self::remove_empty_rows): re-embed
    /// a compacted matrix into a `size`-dimensional space, zero-filling the
    /// rows not named by `convert`.
    pub fn reconstruct_empty_rows(&self, convert: &[usize], size: usize) -> SymmetricMatrix {
        let mut full = SymmetricMatrix::new(size);
        for (&(i, j), &value) in &self.entries {
            full.set(convert[i], convert[j], value);
        }
        full
    }

    /// Dense mirror-expanded copy of the matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.size, self.size);
        for (&(i, j), &value) in &self.entries {
            dense[(i, j)] = value;
            dense[(j, i)] = value;
        }
        dense
    }

    /// Eigenvalues in ascending order with eigenvectors in matching order.
    ///
    /// Structurally empty rows are compacted away first, so the spectrum
    /// has one entry per occupied row. Eigenvectors are returned in the
    /// original index space with zeros in the empty rows.
    pub fn eigensystem(&self) -> (Vec<f64>, Vec<Vec<f64>>) {
        let (compact, convert) = self.remove_empty_rows();
        let n = compact.size();
        if n == 0 {
            return (Vec::new(), Vec::new());
        }
        let eigen = SymmetricEigen::new(compact.to_dense());
        // The decomposition does not order the spectrum; sort eigenpairs.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[a]
                .partial_cmp(&eigen.eigenvalues[b])
                .expect("non-finite eigenvalue")
        });
        let mut values = Vec::with_capacity(n);
        let mut vectors = Vec::with_capacity(n);
        for &k in &order {
            values.push(eigen.eigenvalues[k]);
            let mut full = vec![0.0; self.size];
            for (ci, &oi) in convert.iter().enumerate() {
                full[oi] = eigen.eigenvectors[(ci, k)];
            }
            vectors.push(full);
        }
        (values, vectors)
    }
}

/// Elementwise equality of same-sized matrices.
impl PartialEq for SymmetricMatrix {
    fn eq(&self, other: &Self) -> bool {
        // Zero values are never stored, so map equality is matrix equality.
        self.size == other.size && self.entries == other.entries
    }
}
