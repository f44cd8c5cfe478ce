use crate::{bucket::ColorBucket, quantizer::Buckets};
use std::cmp::Ordering;

/// Picks the bucket with the highest score. Equal scores go to the lowest `(r, g, b)` key, so the winner never depends
/// on iteration order.
pub(crate) fn select(buckets: &Buckets) -> Option<ColorBucket> {
    buckets.values().copied().max_by(compare)
}

fn compare(lhs: &ColorBucket, rhs: &ColorBucket) -> Ordering {
    lhs.score()
        .total_cmp(&rhs.score())
        // reversed: among equal scores the smaller key must compare as greater
        .then_with(|| rhs.key().cmp(&lhs.key()))
}
