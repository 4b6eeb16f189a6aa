//! Tree-height statistics.

use crate::error::{EstateError, EstateResult};
use crate::gateway::EstateGateway;
use crate::models::{EstateId, EstateStats};

/// Summarize a multiset of heights.
///
/// The median follows the continuous-percentile definition. Heights are
/// whole meters, so an even-count median (the mean of the two middle values)
/// is truncated toward zero.
pub fn summarize_heights(heights: &[u32]) -> EstateStats {
    if heights.is_empty() {
        return EstateStats::default();
    }

    let mut sorted = heights.to_vec();
    sorted.sort_unstable();

    let count = sorted.len();
    let mid = count / 2;
    let median = if count % 2 == 1 {
        sorted[mid]
    } else {
        ((u64::from(sorted[mid - 1]) + u64::from(sorted[mid])) / 2) as u32
    };

    EstateStats {
        count: count as u64,
        max_height: sorted[count - 1],
        min_height: sorted[0],
        median_height: median,
    }
}

#[derive(Clone)]
pub struct StatsEngine<G> {
    gateway: G,
}

impl<G: EstateGateway> StatsEngine<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn compute_stats(&self, estate_id: &EstateId) -> EstateResult<EstateStats> {
        if self.gateway.get_estate(estate_id).await?.is_none() {
            return Err(EstateError::EstateNotFound(estate_id.clone()));
        }

        let heights: Vec<u32> = self
            .gateway
            .get_trees(estate_id)
            .await?
            .iter()
            .map(|tree| tree.height)
            .collect();

        Ok(summarize_heights(&heights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use crate::models::{NewEstate, NewTree};
    use crate::registry::TreeRegistry;

    #[test]
    fn empty_sample_is_all_zero() {
        assert_eq!(summarize_heights(&[]), EstateStats::default());
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let stats = summarize_heights(&[10, 20, 10]);
        assert_eq!(
            stats,
            EstateStats {
                count: 3,
                max_height: 20,
                min_height: 10,
                median_height: 10,
            }
        );
    }

    #[test]
    fn even_count_median_averages_sorted_middles() {
        // sorted: 1 4 9 20
        let stats = summarize_heights(&[20, 4, 1, 9]);
        assert_eq!(stats.median_height, 6);
        assert_eq!(stats.min_height, 1);
        assert_eq!(stats.max_height, 20);

        assert_eq!(summarize_heights(&[3, 5]).median_height, 4);
        assert_eq!(summarize_heights(&[7]).median_height, 7);
    }

    #[tokio::test]
    async fn stats_for_missing_estate_fail() {
        let engine = StatsEngine::new(MemoryGateway::new());
        let err = engine
            .compute_stats(&EstateId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::EstateNotFound(_)));
    }

    #[tokio::test]
    async fn stats_follow_placed_trees() {
        let gateway = MemoryGateway::new();
        let registry = TreeRegistry::new(gateway.clone());
        let engine = StatsEngine::new(gateway);

        let estate = registry
            .create_estate(NewEstate {
                width: 5,
                length: 1,
            })
            .await
            .unwrap();
        assert_eq!(
            engine.compute_stats(&estate.id).await.unwrap(),
            EstateStats::default()
        );

        for (x, height) in [(1, 10), (2, 20), (3, 10)] {
            registry
                .place_tree(&estate.id, NewTree { x, y: 0, height })
                .await
                .unwrap();
        }
        let stats = engine.compute_stats(&estate.id).await.unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_height, 10);
        assert_eq!(stats.max_height, 20);
        assert_eq!(stats.median_height, 10);
    }
}
