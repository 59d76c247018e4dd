//! Focus order compilation
//!
//! A pure function of the registry: the linear sequence in which elements
//! receive focus. Recompiled synchronously after every mutation, so
//! navigation never observes a stale order.

use crate::element::NavigableElement;
use crate::registry::ElementRegistry;

/// Rank for content outside any registered landmark or section; sorts after
/// everything grouped.
const UNGROUPED: i64 = i64::MAX;

/// Compile the focus order: every element with `accessible && focusable`,
/// sorted by (landmark order, section order, element order), ties broken by
/// registration sequence. Input-order independent.
pub fn compile_focus_order(registry: &ElementRegistry) -> Vec<String> {
    let mut keyed: Vec<(i64, i64, i32, u64, &str)> = registry
        .elements()
        .filter(|e| e.is_navigable())
        .map(|e| {
            let (landmark_rank, section_rank) = group_ranks(registry, e);
            (landmark_rank, section_rank, e.order, e.seq, e.id.as_str())
        })
        .collect();

    keyed.sort_unstable();
    tracing::trace!(len = keyed.len(), "focus order compiled");

    keyed.into_iter().map(|(_, _, _, _, id)| id.to_string()).collect()
}

/// (landmark, section) sort ranks for one element. Elements whose section is
/// unregistered rank ungrouped on both levels; sections without a registered
/// landmark rank ungrouped on the landmark level only.
fn group_ranks(registry: &ElementRegistry, element: &NavigableElement) -> (i64, i64) {
    match registry.section_of(element) {
        Some(section) => {
            let landmark_rank = registry
                .landmark_of(element)
                .map(|l| i64::from(l.order))
                .unwrap_or(UNGROUPED);
            (landmark_rank, i64::from(section.order))
        }
        None => (UNGROUPED, UNGROUPED),
    }
}
