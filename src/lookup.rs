// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lookup table of a right-continuous stepwise constant function.

/// Stepwise constant function `y = f(x)` given by `N` sorted breakpoints.
///
/// For breakpoints `x_i` and values `y_i`:
///
/// ```text
/// x_i <= x < x_(i+1)  -->  y_i
/// x_(N-1) <= x        -->  y_(N-1)
/// ```
///
/// Values `x < x_0` are outside of the function domain. The leap seconds
/// tables put their first breakpoint at `i64::MIN` so that this never
/// happens in practice; should it happen, the first value is returned.
///
/// # Examples
///
/// ```
/// use vires_time::LookupTable;
///
/// let table = LookupTable::new(vec![i64::MIN, 0, 10], vec![0, 1, 2]);
/// assert_eq!(table.evaluate(-1), 0);
/// assert_eq!(table.evaluate(0), 1);
/// assert_eq!(table.evaluate(9), 1);
/// assert_eq!(table.evaluate(10), 2);
/// assert_eq!(table.evaluate(i64::MAX), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    x: Vec<i64>,
    y: Vec<i64>,
}

impl LookupTable {
    /// Create a new lookup table from breakpoints `x` and values `y`.
    ///
    /// # Panics
    ///
    /// Panics if the arrays are empty, of different lengths, or if the
    /// breakpoints are not sorted in non-decreasing order.
    pub fn new(x: Vec<i64>, y: Vec<i64>) -> Self {
        assert_eq!(x.len(), y.len(), "lookup table arrays differ in length");
        assert!(!x.is_empty(), "lookup table must have at least one breakpoint");
        assert!(
            x.windows(2).all(|pair| pair[0] <= pair[1]),
            "lookup table breakpoints must be sorted"
        );
        Self { x, y }
    }

    /// Breakpoints.
    #[inline]
    pub fn breakpoints(&self) -> &[i64] {
        &self.x
    }

    /// Values held from each breakpoint on.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.y
    }

    /// Number of breakpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Evaluate the function at `x`.
    #[inline]
    pub fn evaluate(&self, x: i64) -> i64 {
        // binary search, right side, minus one
        let idx = self.x.partition_point(|&breakpoint| breakpoint <= x);
        self.y[idx.saturating_sub(1)]
    }

    /// Evaluate the function for each element of `x`.
    pub fn evaluate_array(&self, x: &[i64]) -> Vec<i64> {
        x.iter().map(|&value| self.evaluate(value)).collect()
    }
}
