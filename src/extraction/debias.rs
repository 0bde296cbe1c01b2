//! Von Neumann debiasing.
//!
//! Removes first-order bias from a stationary binary source by
//! examining consecutive non-overlapping bit pairs: unequal pairs emit
//! the first bit, equal pairs emit nothing. Costs about half the input
//! on unbiased data, more on biased data.

use super::Bits;

/// Debiases a bit sequence pairwise.
///
/// `01` emits 0, `10` emits 1, `00` and `11` are discarded. A trailing
/// unpaired bit is dropped without being processed. Output length is
/// bounded above by `floor(len / 2)`; empty or all-identical input
/// yields an empty output, which is valid.
pub fn von_neumann(bits: &Bits) -> Bits {
    let mut corrected = Bits::with_capacity(bits.len() / 2);
    for pair in bits.as_slice().chunks_exact(2) {
        if pair[0] != pair[1] {
            corrected.push(pair[0]);
        }
    }
    corrected
}
