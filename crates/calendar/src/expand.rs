//! Index expansion for candidate day selection.

/// Expands a set of base indices by a set of offsets, clipping to `[0, n_max)`.
///
/// Computes the Cartesian sum `{b + o | b in base, o in offsets}`, clips each
/// result to the range `[0, n_max)`, then deduplicates and sorts the output.
///
/// This is used to expand candidate days by +/-k windows around each base index.
///
/// # Example
///
/// ```ignore
/// let indices = expand_indices(&[10, 20], &[-1, 0, 1], 365);
/// assert_eq!(indices, vec![9, 10, 11, 19, 20, 21]);
/// ```
pub fn expand_indices(base: &[usize], offsets: &[i32], n_max: usize) -> Vec<usize> {
    if n_max == 0 {
        return Vec::new();
    }
    let mut result = Vec::with_capacity(base.len() * offsets.len());
    for &b in base {
        for &o in offsets {
            let idx = b as isize + o as isize;
            if idx >= 0 {
                let idx = idx as usize;
                if idx < n_max {
                    result.push(idx);
                }
            }
        }
    }
    result.sort_unstable();
    result.dedup();
    result
}
