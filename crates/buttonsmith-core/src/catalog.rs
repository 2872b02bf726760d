//! # Catalog Aggregation
//!
//! Computes per-category button counts over an arbitrary-depth category tree.
//!
//! ## What Gets Computed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Direct vs Total Counts                               │
//! │                                                                         │
//! │  Bands (direct: 2) ──────────────── total: 6                           │
//! │    └── Punk (direct: 1) ─────────── total: 4                           │
//! │          └── Hardcore (direct: 3) ─ total: 3                           │
//! │                                                                         │
//! │  direct = buttons assigned to exactly this category                    │
//! │  total  = direct + Σ total(child) over immediate children              │
//! │                                                                         │
//! │  Invariants: total >= direct; leaf total == leaf direct                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Model
//! The aggregator is a stateless batch computation over an immutable snapshot:
//! flat slices of [`Category`] and [`Button`] rows fetched in full by the
//! caller (no pagination here). Each call produces a fresh result; there is
//! no carried state between calls.
//!
//! ## Resilience
//! Snapshots can be partially fetched or slightly stale, so dangling
//! references never crash the aggregator:
//! - a category whose `parent_id` is missing from the snapshot is a root
//! - a button whose `category_id` is missing counts toward nothing
//! - accidental cycles from corrupted data terminate: a repeated id is
//!   treated as already expanded instead of recursing forever

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Button, Category};

// =============================================================================
// Derived Types
// =============================================================================

/// Button counts for one category, recomputed on demand and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryCounts {
    /// Buttons whose `category_id` equals this category's id exactly.
    pub direct: i64,

    /// `direct` plus the recursive sum of `total` over all immediate
    /// children. Equal to `direct` for leaf categories.
    pub total: i64,
}

// =============================================================================
// Parent/Child Index
// =============================================================================

/// Builds the parent → children adjacency map for a category snapshot.
///
/// One bucket per distinct parent value, with a `None` bucket for roots.
/// A `parent_id` that references an id missing from the snapshot is
/// normalized into the `None` bucket, matching how traversal treats
/// orphaned references. O(n) to build, reused across all count queries in
/// the same request.
///
/// ## Example
/// ```rust
/// # use buttonsmith_core::catalog::build_child_index;
/// # use buttonsmith_core::types::Category;
/// # use chrono::Utc;
/// # let now = Utc::now();
/// # let cat = |id: &str, parent: Option<&str>| Category {
/// #     id: id.into(), parent_id: parent.map(Into::into), name: id.into(),
/// #     slug: id.into(), is_active: true, created_at: now, updated_at: now,
/// # };
/// let categories = vec![cat("a", None), cat("b", Some("a"))];
/// let index = build_child_index(&categories);
/// assert_eq!(index[&None], vec!["a".to_string()]);
/// assert_eq!(index[&Some("a".to_string())], vec!["b".to_string()]);
/// ```
pub fn build_child_index(categories: &[Category]) -> HashMap<Option<String>, Vec<String>> {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

    let mut index: HashMap<Option<String>, Vec<String>> = HashMap::new();
    for category in categories {
        let bucket = match &category.parent_id {
            Some(parent) if known.contains(parent.as_str()) => Some(parent.clone()),
            // Missing parent: orphaned reference, treated as a root.
            _ => None,
        };
        index.entry(bucket).or_default().push(category.id.clone());
    }

    index
}

/// Internal borrowed adjacency map shared by traversal and counting.
fn child_index<'a>(categories: &'a [Category]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for category in categories {
        if let Some(parent) = category.parent_id.as_deref() {
            index.entry(parent).or_default().push(category.id.as_str());
        }
    }
    index
}

// =============================================================================
// Descendant Resolution
// =============================================================================

/// Returns the given category id plus all of its transitive children.
///
/// Used by the storefront to answer "all buttons under this category":
/// the caller resolves the id set here, then fetches buttons assigned to
/// any id in the set.
///
/// Depth-first over the parent → children relation. Categories are assumed
/// acyclic, but a visited set stops revisits so that cycles introduced by
/// data corruption still terminate. An id absent from the snapshot yields
/// just itself.
pub fn descendant_ids(category_id: &str, categories: &[Category]) -> HashSet<String> {
    let children = child_index(categories);

    let mut result: HashSet<String> = HashSet::new();
    let mut stack: Vec<&str> = vec![category_id];

    while let Some(id) = stack.pop() {
        if !result.insert(id.to_string()) {
            // Already expanded (shared ancestor or corrupted cycle).
            continue;
        }
        if let Some(kids) = children.get(id) {
            stack.extend(kids.iter().copied());
        }
    }

    result
}

// =============================================================================
// Button Counting
// =============================================================================

/// Computes direct and recursive button counts for every category in the
/// snapshot.
///
/// ## Algorithm
/// 1. One scan over buttons accumulates `direct` counts. Uncategorized
///    buttons (`category_id = None`) and buttons referencing an unknown
///    category are skipped entirely - they contribute to no count.
/// 2. A memoized post-order walk computes `total(c) = direct(c) +
///    Σ total(child)`. The memo guarantees each category's total is computed
///    exactly once no matter how many ancestors reference it; without it the
///    walk would be exponential on deep trees.
///
/// The output has one entry per input category, including categories with
/// zero buttons (whose `total` may still be positive from descendants).
pub fn count_buttons_by_category(
    categories: &[Category],
    buttons: &[Button],
) -> HashMap<String, CategoryCounts> {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

    // Step 1: direct counts in a single pass over buttons.
    let mut direct: HashMap<&str, i64> = HashMap::new();
    for button in buttons {
        if let Some(category_id) = button.category_id.as_deref() {
            if known.contains(category_id) {
                *direct.entry(category_id).or_insert(0) += 1;
            }
        }
    }

    // Step 2: memoized post-order totals.
    let children = child_index(categories);
    let mut memo: HashMap<&str, i64> = HashMap::new();
    let mut in_progress: HashSet<&str> = HashSet::new();

    let mut counts = HashMap::with_capacity(categories.len());
    for category in categories {
        let id = category.id.as_str();
        let total = total_for(id, &children, &direct, &mut memo, &mut in_progress);
        counts.insert(
            category.id.clone(),
            CategoryCounts {
                direct: direct.get(id).copied().unwrap_or(0),
                total,
            },
        );
    }

    counts
}

/// Memoized recursive total for one category.
///
/// `in_progress` guards against cycles: a repeated id on the current path is
/// treated as already expanded (contributes 0) rather than recursing forever.
fn total_for<'a>(
    id: &'a str,
    children: &HashMap<&'a str, Vec<&'a str>>,
    direct: &HashMap<&'a str, i64>,
    memo: &mut HashMap<&'a str, i64>,
    in_progress: &mut HashSet<&'a str>,
) -> i64 {
    if let Some(&total) = memo.get(id) {
        return total;
    }
    if !in_progress.insert(id) {
        return 0;
    }

    let mut total = direct.get(id).copied().unwrap_or(0);
    if let Some(kids) = children.get(id) {
        for child in kids {
            total += total_for(child, children, direct, memo, in_progress);
        }
    }

    in_progress.remove(id);
    memo.insert(id, total);
    total
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: &str, parent: Option<&str>) -> Category {
        let now = Utc::now();
        Category {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_string(),
            slug: id.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn button(id: &str, category: Option<&str>) -> Button {
        let now = Utc::now();
        Button {
            id: id.to_string(),
            category_id: category.map(str::to_string),
            sku: format!("BTN-{}", id),
            name: id.to_string(),
            description: None,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Three-level chain: bands (2 direct) -> punk (1) -> hardcore (3).
    fn three_level_snapshot() -> (Vec<Category>, Vec<Button>) {
        let categories = vec![
            category("bands", None),
            category("punk", Some("bands")),
            category("hardcore", Some("punk")),
        ];
        let buttons = vec![
            button("b1", Some("bands")),
            button("b2", Some("bands")),
            button("b3", Some("punk")),
            button("b4", Some("hardcore")),
            button("b5", Some("hardcore")),
            button("b6", Some("hardcore")),
        ];
        (categories, buttons)
    }

    #[test]
    fn test_three_level_totals() {
        let (categories, buttons) = three_level_snapshot();
        let counts = count_buttons_by_category(&categories, &buttons);

        assert_eq!(counts["hardcore"], CategoryCounts { direct: 3, total: 3 });
        assert_eq!(counts["punk"], CategoryCounts { direct: 1, total: 4 });
        assert_eq!(counts["bands"], CategoryCounts { direct: 2, total: 6 });
    }

    #[test]
    fn test_sum_law_holds_recursively() {
        let (categories, buttons) = three_level_snapshot();
        let counts = count_buttons_by_category(&categories, &buttons);
        let index = build_child_index(&categories);

        // total(c) == direct(c) + Σ total(child) for every category.
        for category in &categories {
            let child_sum: i64 = index
                .get(&Some(category.id.clone()))
                .map(|kids| kids.iter().map(|k| counts[k].total).sum())
                .unwrap_or(0);
            assert_eq!(counts[&category.id].total, counts[&category.id].direct + child_sum);
        }
    }

    #[test]
    fn test_leaf_total_equals_direct() {
        let categories = vec![category("root", None), category("leaf", Some("root"))];
        let buttons = vec![button("b1", Some("leaf")), button("b2", Some("leaf"))];

        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts["leaf"].direct, counts["leaf"].total);
        assert_eq!(counts["leaf"].total, 2);
    }

    #[test]
    fn test_uncategorized_buttons_excluded() {
        let categories = vec![category("root", None)];
        let buttons = vec![
            button("b1", Some("root")),
            button("b2", None),
            button("b3", None),
        ];

        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts["root"], CategoryCounts { direct: 1, total: 1 });
    }

    #[test]
    fn test_unknown_category_reference_excluded() {
        let categories = vec![category("root", None)];
        let buttons = vec![button("b1", Some("root")), button("b2", Some("deleted-id"))];

        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["root"], CategoryCounts { direct: 1, total: 1 });
    }

    #[test]
    fn test_zero_button_categories_present_in_output() {
        let categories = vec![
            category("empty-root", None),
            category("child", Some("empty-root")),
        ];
        let buttons = vec![button("b1", Some("child"))];

        let counts = count_buttons_by_category(&categories, &buttons);
        // direct = 0 but total > 0 from the descendant.
        assert_eq!(counts["empty-root"], CategoryCounts { direct: 0, total: 1 });
    }

    #[test]
    fn test_wide_tree_counts() {
        let mut categories = vec![category("root", None)];
        let mut buttons = Vec::new();
        for i in 0..50 {
            let id = format!("child-{}", i);
            categories.push(category(&id, Some("root")));
            buttons.push(button(&format!("b-{}", i), Some(&id)));
        }

        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts["root"], CategoryCounts { direct: 0, total: 50 });
        assert_eq!(counts["child-7"], CategoryCounts { direct: 1, total: 1 });
    }

    #[test]
    fn test_descendant_ids_includes_self_and_transitive_children() {
        let (categories, _) = three_level_snapshot();

        let ids = descendant_ids("bands", &categories);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("bands"));
        assert!(ids.contains("punk"));
        assert!(ids.contains("hardcore"));

        let ids = descendant_ids("hardcore", &categories);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("hardcore"));
    }

    #[test]
    fn test_descendant_ids_of_unknown_id() {
        let (categories, _) = three_level_snapshot();
        let ids = descendant_ids("nope", &categories);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("nope"));
    }

    #[test]
    fn test_orphaned_parent_treated_as_root() {
        // Category x references a parent that was deleted from the snapshot.
        let categories = vec![category("x", Some("missing-id")), category("y", Some("x"))];
        let buttons = vec![button("b1", Some("x")), button("b2", Some("y"))];

        // descendant_ids still works from the orphan.
        let ids = descendant_ids("x", &categories);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("x"));
        assert!(ids.contains("y"));

        // The orphan lands in the root bucket of the index.
        let index = build_child_index(&categories);
        assert_eq!(index[&None], vec!["x".to_string()]);

        // Counting is unaffected.
        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts["x"], CategoryCounts { direct: 1, total: 2 });
    }

    #[test]
    fn test_accidental_cycle_terminates() {
        // Corrupted data: a <-> b reference each other.
        let categories = vec![
            category("a", Some("b")),
            category("b", Some("a")),
            category("c", Some("a")),
        ];
        let buttons = vec![
            button("b1", Some("a")),
            button("b2", Some("b")),
            button("b3", Some("c")),
        ];

        // Must terminate and include every cycle member once.
        let ids = descendant_ids("a", &categories);
        assert!(ids.contains("a"));
        assert!(ids.contains("b"));
        assert!(ids.contains("c"));

        // Counting terminates and stays best-effort: every category gets an
        // entry and direct counts are exact.
        let counts = count_buttons_by_category(&categories, &buttons);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["a"].direct, 1);
        assert_eq!(counts["b"].direct, 1);
        assert_eq!(counts["c"].direct, 1);
        for c in counts.values() {
            assert!(c.total >= c.direct);
        }
    }

    #[test]
    fn test_build_child_index_buckets() {
        let categories = vec![
            category("a", None),
            category("b", None),
            category("a1", Some("a")),
            category("a2", Some("a")),
        ];

        let index = build_child_index(&categories);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&None].len(), 2);
        assert_eq!(index[&Some("a".to_string())].len(), 2);
    }
}
