//! Capacity-bounded slicing of a stub's child IDs.

use crate::types::Amount;

/// The next batch of IDs to request: `children[start .. start + min(desired, limit)]`.
///
/// The slice is clamped to the end of `children`; a `start` past the end yields
/// an empty slice. Callers check for that before issuing a request.
pub fn next_id_slice(
    children: &[String],
    start_index: usize,
    desired: Amount,
    limit: usize,
) -> &[String] {
    let end = start_index
        .saturating_add(desired.cap(limit))
        .min(children.len());
    children.get(start_index..end).unwrap_or_default()
}

/// Whether expansion from `start_index` has nothing left to do
pub(crate) fn is_terminal(children: &[String], start_index: usize, amount: Amount) -> bool {
    amount.is_exhausted() || start_index >= children.len()
}
