//! Effective weights and cumulative-weight selection.
//!
//! Every table variant selects candidates the same way: sum the effective
//! weights, draw a point uniformly in `[0, total)`, and walk the candidates
//! in declaration order until the cumulative weight exceeds the point.

use rand::Rng;
use rand::rngs::StdRng;

use tw_core::{Entry, SourceRef};

/// The weight an entry or source has when none is given explicitly.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Resolve an explicit weight to its effective value.
///
/// Returns the explicit weight when present and non-negative, otherwise 1.
/// Negative weights are treated as absent; the validator flags them.
pub fn effective_weight(explicit: Option<f64>) -> f64 {
    match explicit {
        Some(w) if w >= 0.0 => w,
        _ => DEFAULT_WEIGHT,
    }
}

/// Effective weight of an entry.
pub fn entry_weight(entry: &Entry) -> f64 {
    effective_weight(entry.weight)
}

/// Effective weight of a composite source.
pub fn source_weight(source: &SourceRef) -> f64 {
    effective_weight(source.weight)
}

/// Sum of effective weights over a candidate set.
pub fn total_weight<T>(items: &[T], weight_of: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(weight_of).sum()
}

/// The outcome of one weighted selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    /// Index of the selected candidate.
    pub index: usize,
    /// Effective weight of the selected candidate.
    pub weight: f64,
    /// Probability the candidate had at selection time (`weight / total`).
    pub probability: f64,
}

/// Select the candidate whose cumulative weight span contains `point`.
///
/// `point` must lie in `[0, total)`. Candidates are walked in declaration
/// order; a candidate with weight 0 occupies an empty span and can never be
/// selected. Returns `None` when the set is empty or its total weight is 0.
pub fn pick_at<T>(items: &[T], weight_of: impl Fn(&T) -> f64, point: f64) -> Option<Pick> {
    let total = total_weight(items, &weight_of);
    if total <= 0.0 {
        return None;
    }

    let mut cumulative = 0.0;
    for (index, item) in items.iter().enumerate() {
        let weight = weight_of(item);
        cumulative += weight;
        if point < cumulative && weight > 0.0 {
            return Some(Pick {
                index,
                weight,
                probability: weight / total,
            });
        }
    }

    // Floating-point accumulation can leave `point` just past the final
    // cumulative sum; fall back to the last selectable candidate.
    let index = items.iter().rposition(|item| weight_of(item) > 0.0)?;
    let weight = weight_of(&items[index]);
    Some(Pick {
        index,
        weight,
        probability: weight / total,
    })
}

/// Draw a uniform point and select a candidate by cumulative weight.
///
/// Returns `None` when the set is empty or its total weight is 0 — the
/// caller turns that into an `EmptyPool` error with the table id attached.
pub fn pick_weighted<T>(
    items: &[T],
    weight_of: impl Fn(&T) -> f64,
    rng: &mut StdRng,
) -> Option<Pick> {
    let total = total_weight(items, &weight_of);
    if total <= 0.0 {
        return None;
    }
    let point = rng.random_range(0.0..total);
    pick_at(items, weight_of, point)
}
