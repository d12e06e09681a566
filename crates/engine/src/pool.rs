//! Item pools: per-category random draws made before any cell is filled.
//!
//! Drawing every category's items up front, without replacement, is what
//! keeps a category from repeating an item anywhere in the grid.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::items::ItemTable;
use crate::mask::OccurrenceCounts;

/// Items drawn for one category, not yet placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPool {
    items: Vec<String>,
}

impl CategoryPool {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Take one item out of the pool. O(1); which item comes out is
    /// irrelevant because the draw was already random.
    pub fn remove_one(&mut self) -> Option<String> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    categories: BTreeMap<String, CategoryPool>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, pool: CategoryPool) {
        self.categories.insert(category.into(), pool);
    }

    pub fn get(&self, category: &str) -> Option<&CategoryPool> {
        self.categories.get(category)
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut CategoryPool> {
        self.categories.get_mut(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryPool)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of items left across all categories.
    pub fn remaining(&self) -> usize {
        self.categories.values().map(CategoryPool::len).sum()
    }
}

/// Draw `occurrences[c]` distinct candidates for every category `c`.
///
/// Each draw is a uniformly random subset of the category's candidates, in
/// random order. Categories are visited in name order, so a seeded `rng`
/// gives the same pool for the same inputs.
pub fn build_pool<R: Rng + ?Sized>(
    occurrences: &OccurrenceCounts,
    table: &ItemTable,
    rng: &mut R,
) -> Result<Pool, EngineError> {
    let mut pool = Pool::new();

    for (category, &required) in occurrences {
        let candidates = table
            .candidates(category)
            .ok_or_else(|| EngineError::CategoryNotFound(category.clone()))?;

        if candidates.len() < required {
            return Err(EngineError::InsufficientItems {
                category: category.clone(),
                required,
                available: candidates.len(),
            });
        }

        let drawn: Vec<String> = candidates
            .choose_multiple(rng, required)
            .map(|item| item.to_string())
            .collect();

        log::debug!(
            "drew {} of {} candidate(s) for '{}'",
            drawn.len(),
            candidates.len(),
            category
        );
        pool.insert(category.clone(), CategoryPool::new(drawn));
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn counts(pairs: &[(&str, usize)]) -> OccurrenceCounts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_draws_exact_counts() {
        let table = ItemTable::from_columns([
            ("A", vec!["a1", "a2", "a3"]),
            ("B", vec!["b1"]),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let pool = build_pool(&counts(&[("A", 3), ("B", 1)]), &table, &mut rng).unwrap();

        let a: HashSet<_> = pool.get("A").unwrap().items().iter().cloned().collect();
        let expected: HashSet<_> = ["a1", "a2", "a3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(a, expected);
        assert_eq!(pool.get("B").unwrap().items(), ["b1".to_string()]);
        assert_eq!(pool.remaining(), 4);
    }

    #[test]
    fn test_partial_draw_is_distinct_subset() {
        let items: Vec<String> = (0..50).map(|i| format!("item{i}")).collect();
        let table = ItemTable::from_columns([("A", items.clone())]);
        let mut rng = StdRng::seed_from_u64(42);
        let pool = build_pool(&counts(&[("A", 20)]), &table, &mut rng).unwrap();

        let drawn = pool.get("A").unwrap().items();
        assert_eq!(drawn.len(), 20);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 20);
        assert!(drawn.iter().all(|d| items.contains(d)));
    }

    #[test]
    fn test_empty_column_is_insufficient() {
        let table = ItemTable::from_columns([("Y", Vec::<String>::new())]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_pool(&counts(&[("Y", 1)]), &table, &mut rng).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientItems { category: "Y".into(), required: 1, available: 0 }
        );
    }

    #[test]
    fn test_blanks_do_not_count_as_candidates() {
        let table = ItemTable::from_columns([("A", vec!["a1", "", " "])]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_pool(&counts(&[("A", 2)]), &table, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientItems { available: 1, .. }));
    }

    #[test]
    fn test_unknown_category() {
        let table = ItemTable::from_columns([("A", vec!["a1"])]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_pool(&counts(&[("Z", 1)]), &table, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::CategoryNotFound("Z".into()));
    }

    #[test]
    fn test_zero_count_gives_empty_pool() {
        let table = ItemTable::from_columns([("A", Vec::<String>::new())]);
        let mut rng = StdRng::seed_from_u64(1);
        let pool = build_pool(&counts(&[("A", 0)]), &table, &mut rng).unwrap();
        assert!(pool.get("A").unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_pool() {
        let items: Vec<String> = (0..30).map(|i| format!("x{i}")).collect();
        let table = ItemTable::from_columns([("X", items.clone()), ("Y", items)]);
        let occ = counts(&[("X", 10), ("Y", 5)]);

        let p1 = build_pool(&occ, &table, &mut StdRng::seed_from_u64(99)).unwrap();
        let p2 = build_pool(&occ, &table, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_remove_one_drains() {
        let mut pool = CategoryPool::new(vec!["a".into(), "b".into()]);
        assert_eq!(pool.len(), 2);
        assert!(pool.remove_one().is_some());
        assert!(pool.remove_one().is_some());
        assert!(pool.remove_one().is_none());
        assert!(pool.is_empty());
    }
}
