use serde::Serialize;

use crate::enumerate::PathRecord;

/// Enumerated paths ordered by ascending cost.
///
/// The sort is stable, so paths with equal cost keep their discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedPaths {
    paths: Vec<PathRecord>,
}

impl RankedPaths {
    /// The cheapest enumerated path, if any.
    ///
    /// When a negative cycle reaches the destination this is only the cheapest
    /// of the simple paths seen, not a true minimum.
    pub fn cheapest(&self) -> Option<&PathRecord> {
        self.paths.first()
    }

    pub fn paths(&self) -> &[PathRecord] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathRecord> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<PathRecord> {
        self.paths
    }
}

/// Sort paths ascending by cost.
pub fn rank(mut paths: Vec<PathRecord>) -> RankedPaths {
    paths.sort_by_key(|path| path.cost);
    RankedPaths { paths }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nodes: &[usize], cost: i64) -> PathRecord {
        PathRecord {
            nodes: nodes.to_vec(),
            cost,
            distance: 0.0,
        }
    }

    #[test]
    fn cheapest_comes_first() {
        let ranked = rank(vec![record(&[0, 2], 20), record(&[0, 1, 2], 10)]);
        assert_eq!(ranked.cheapest().map(|p| p.cost), Some(10));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let ranked = rank(vec![
            record(&[0, 3], 7),
            record(&[0, 1, 3], 2),
            record(&[0, 2, 3], 7),
        ]);
        let order: Vec<_> = ranked.iter().map(|p| p.nodes.clone()).collect();
        assert_eq!(order, vec![vec![0, 1, 3], vec![0, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn empty_input_has_no_cheapest() {
        let ranked = rank(Vec::new());
        assert!(ranked.is_empty());
        assert!(ranked.cheapest().is_none());
    }
}
