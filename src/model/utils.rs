//! Small bit-fiddling helpers shared across the model.

/// Iterate the set bits of a mask as [`Square`](crate::model::Square)s,
/// most significant first.
///
/// ```
/// # use esochess::model::Square;
/// # use esochess::biterate;
/// let mut seen = vec![];
/// biterate!(sq in Square::e4.mask() | Square::a1.mask() => {
///     seen.push(sq);
/// });
/// assert_eq!(seen, vec![Square::e4, Square::a1]);
/// ```
#[macro_export]
macro_rules! biterate {
    ($sq:ident in $mask:expr => $body:block) => {
        for $sq in $crate::model::Square::descending($mask) $body
    };
}

/// Fold a slice of masks with bitwise or.
#[inline]
pub fn bin_sum(masks: &[u64]) -> u64 {
    masks.iter().fold(0, |acc, m| acc | m)
}
