//! An extendable square matrix used for relations (e.g. the simulation
//! preorder) and DP tables, in three interchangeable representations.
//!
//! No direct analog of this type was retrieved from the C++ reference
//! sources; it is authored following the
//! design notes' instruction to model matrix/alphabet backings as a closed
//! variant enum rather than open trait objects, which also matches how the
//! reference crate's own `automata::nfa::NFA` expects a `Matrix<Identifier>`
//! return type from `nfa_matrix()`/`eps_matrix()`-style computations.

use std::collections::HashMap;

/// Chooses which backing representation a [`Matrix`] uses. All three support
/// the same `get`/`set`/`extend` contract; callers pick based on expected
/// density and access pattern.
#[derive(Debug, Clone)]
pub enum Matrix<T> {
    /// Single linear buffer, anti-diagonal indexed. Best cache behaviour for
    /// dense matrices accessed in `(i,j)` order.
    Cascade(Cascade<T>),
    /// Vector-of-vectors. Simple and fast to extend; one extra indirection per access.
    DynamicRows(DynamicRows<T>),
    /// Hash map from `i*cap + j` to `T`. Best for sparse matrices.
    Hashed(Hashed<T>),
}

impl<T: Clone> Matrix<T> {
    /// A cascade-backed matrix of size `n`, capacity `cap`, filled with `default`.
    pub fn cascade(n: usize, cap: usize, default: T) -> Self {
        Matrix::Cascade(Cascade::new(n, cap, default))
    }

    /// A dynamic-rows-backed matrix of size `n`, filled with `default`.
    pub fn dynamic_rows(n: usize, default: T) -> Self {
        Matrix::DynamicRows(DynamicRows::new(n, default))
    }

    /// A hash-backed matrix of size `n`, capacity `cap`, with `default` returned for unset cells.
    pub fn hashed(n: usize, cap: usize, default: T) -> Self {
        Matrix::Hashed(Hashed::new(n, cap, default))
    }

    /// Current size (matrix is `size x size`).
    pub fn size(&self) -> usize {
        match self {
            Matrix::Cascade(m) => m.n,
            Matrix::DynamicRows(m) => m.rows.len(),
            Matrix::Hashed(m) => m.n,
        }
    }

    /// Reads `(i,j)`. Out-of-range indices are a programmer error.
    pub fn get(&self, i: usize, j: usize) -> &T {
        assert!(i < self.size() && j < self.size(), "matrix index out of range");
        match self {
            Matrix::Cascade(m) => &m.data[m.index(i, j)],
            Matrix::DynamicRows(m) => &m.rows[i][j],
            Matrix::Hashed(m) => m.map.get(&(i * m.cap + j)).unwrap_or(&m.default),
        }
    }

    /// Writes `(i,j) = v`. Out-of-range indices are a programmer error.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        assert!(i < self.size() && j < self.size(), "matrix index out of range");
        match self {
            Matrix::Cascade(m) => {
                let idx = m.index(i, j);
                m.data[idx] = v;
            }
            Matrix::DynamicRows(m) => m.rows[i][j] = v,
            Matrix::Hashed(m) => {
                m.map.insert(i * m.cap + j, v);
            }
        }
    }

    /// Grows the matrix by one row and one column, filling new cells with `default`.
    /// Exceeding the backing capacity (cascade/hashed) is a programmer error.
    pub fn extend(&mut self, default: T) {
        match self {
            Matrix::Cascade(m) => m.extend(default),
            Matrix::DynamicRows(m) => m.extend(default),
            Matrix::Hashed(m) => m.extend(default),
        }
    }
}

impl Matrix<bool> {
    /// `O(n^2)`: every `(i,i)` is `true`.
    pub fn is_reflexive(&self) -> bool {
        (0..self.size()).all(|i| *self.get(i, i))
    }

    /// `O(n^2)`: `(i,j) && (j,i) && i != j` never holds.
    pub fn is_antisymmetric(&self) -> bool {
        let n = self.size();
        for i in 0..n {
            for j in 0..n {
                if i != j && *self.get(i, j) && *self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// `O(n^3)`: `(i,j) && (j,k) => (i,k)`.
    pub fn is_transitive(&self) -> bool {
        let n = self.size();
        for i in 0..n {
            for j in 0..n {
                if !self.get(i, j) {
                    continue;
                }
                for k in 0..n {
                    if *self.get(j, k) && !self.get(i, k) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Anti-diagonal-indexed linear buffer: `i>=j ? i*i+j : j*j+2*j-i`.
#[derive(Debug, Clone)]
pub struct Cascade<T> {
    n: usize,
    cap: usize,
    data: Vec<T>,
    default: T,
}

impl<T: Clone> Cascade<T> {
    fn cells_for(size: usize) -> usize {
        size * size
    }

    pub fn new(n: usize, cap: usize, default: T) -> Self {
        assert!(n <= cap, "initial size exceeds capacity");
        Cascade { n, cap, data: vec![default.clone(); Self::cells_for(n)], default }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        if i >= j {
            i * i + j
        } else {
            j * j + 2 * j - i
        }
    }

    pub fn extend(&mut self, default: T) {
        assert!(self.n < self.cap, "extend past cascade capacity");
        self.n += 1;
        // Extending from size n to n+1 appends 2n+1 cells: the new row/column
        // intersecting at (n,n), without disturbing any existing index since
        // the formula only ever appends at the high end.
        self.data.resize(Self::cells_for(self.n), default);
    }
}

/// Vector-of-vectors representation.
#[derive(Debug, Clone)]
pub struct DynamicRows<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Clone> DynamicRows<T> {
    pub fn new(n: usize, default: T) -> Self {
        DynamicRows { rows: vec![vec![default; n]; n] }
    }

    pub fn extend(&mut self, default: T) {
        for row in self.rows.iter_mut() {
            row.push(default.clone());
        }
        let new_len = self.rows.len() + 1;
        self.rows.push(vec![default; new_len]);
    }
}

/// Hash-map-backed sparse representation.
#[derive(Debug, Clone)]
pub struct Hashed<T> {
    n: usize,
    cap: usize,
    map: HashMap<usize, T>,
    default: T,
}

impl<T: Clone> Hashed<T> {
    pub fn new(n: usize, cap: usize, default: T) -> Self {
        assert!(n <= cap, "initial size exceeds capacity");
        Hashed { n, cap, map: HashMap::new(), default }
    }

    pub fn extend(&mut self, _default: T) {
        assert!(self.n < self.cap, "extend past hashed capacity");
        self.n += 1;
        // Unset cells already read back as `default` via the map's fallback,
        // so there is nothing to materialise for the new row/column.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(mut m: Matrix<i32>) {
        m.set(0, 0, 1);
        m.set(1, 2, 7);
        assert_eq!(*m.get(0, 0), 1);
        assert_eq!(*m.get(1, 2), 7);
        assert_eq!(*m.get(2, 2), 0);
        m.extend(0);
        assert_eq!(m.size(), 4);
        assert_eq!(*m.get(3, 3), 0);
        m.set(3, 0, 9);
        assert_eq!(*m.get(3, 0), 9);
        // previously written cells survive extension
        assert_eq!(*m.get(0, 0), 1);
        assert_eq!(*m.get(1, 2), 7);
    }

    #[test]
    fn cascade_matches_contract() {
        exercise(Matrix::cascade(3, 8, 0));
    }

    #[test]
    fn dynamic_rows_matches_contract() {
        exercise(Matrix::dynamic_rows(3, 0));
    }

    #[test]
    fn hashed_matches_contract() {
        exercise(Matrix::hashed(3, 8, 0));
    }

    #[test]
    fn boolean_predicates() {
        let mut m: Matrix<bool> = Matrix::dynamic_rows(3, false);
        for i in 0..3 {
            m.set(i, i, true);
        }
        assert!(m.is_reflexive());
        assert!(m.is_antisymmetric());
        assert!(m.is_transitive());

        m.set(0, 1, true);
        m.set(1, 0, true);
        assert!(!m.is_antisymmetric());

        let mut t: Matrix<bool> = Matrix::dynamic_rows(3, false);
        t.set(0, 1, true);
        t.set(1, 2, true);
        assert!(!t.is_transitive());
        t.set(0, 2, true);
        assert!(t.is_transitive());
    }
}
