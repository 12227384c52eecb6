//! Priority ordering of snippets.
//!
//! Snippets sort by priority tier first (high, medium, low) and by their
//! numeric `order` inside a tier. Reindexing rewrites every `order` as the
//! snippet's rank in that sequence so the values stay dense integers.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::Snippet;

/// Canonical comparator: tier rank, then `order` ascending.
pub fn compare(a: &Snippet, b: &Snippet) -> Ordering {
    a.priority()
        .rank()
        .cmp(&b.priority().rank())
        .then_with(|| a.order().total_cmp(&b.order()))
}

/// Returns the snippets in canonical order. Equal keys keep their input order.
pub fn sorted<'a, I>(snippets: I) -> Vec<&'a Snippet>
where
    I: IntoIterator<Item = &'a Snippet>,
{
    let mut sorted: Vec<&Snippet> = snippets.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    sorted
}

/// Overwrites every snippet's `order` with its zero-based rank in canonical
/// order. The vector itself is left in storage order.
pub fn reorder(snippets: &mut [Snippet]) {
    let mut ranks: Vec<usize> = (0..snippets.len()).collect();
    ranks.sort_by(|&a, &b| compare(&snippets[a], &snippets[b]));

    for (rank, index) in ranks.into_iter().enumerate() {
        snippets[index].order = Some(rank as f64);
    }
}

/// Moves `dragged_id` onto `target_id`.
///
/// Within one tier the two snippets swap their `order` values and nothing else
/// changes. Across tiers the dragged snippet joins the target's tier right
/// after it (`target.order + 0.5`) and the whole collection is reindexed.
///
/// Returns false when the ids are equal or either one is unknown.
pub fn drag_reorder(snippets: &mut [Snippet], dragged_id: &str, target_id: &str) -> bool {
    if dragged_id == target_id {
        return false;
    }

    let Some(dragged) = snippets.iter().position(|s| s.id == dragged_id) else {
        return false;
    };
    let Some(target) = snippets.iter().position(|s| s.id == target_id) else {
        return false;
    };

    let target_priority = snippets[target].priority();
    let target_order = snippets[target].order();

    if snippets[dragged].priority() == target_priority {
        let dragged_order = snippets[dragged].order();
        snippets[dragged].order = Some(target_order);
        snippets[target].order = Some(dragged_order);
        debug!(dragged_id, target_id, "swapped order within tier");
    } else {
        snippets[dragged].priority = Some(target_priority);
        snippets[dragged].order = Some(target_order + 0.5);
        reorder(snippets);
        debug!(dragged_id, target_id, tier = %target_priority, "moved across tiers");
    }

    true
}
