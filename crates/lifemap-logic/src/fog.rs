//! Per-node fog (neglect) levels.
//!
//! Every node carries an integer level in `0..=100`. Levels start at a
//! random draw, are lowered when activity is logged against the node, can
//! be set directly from the node's slider, and can be raised, lowered or
//! re-rolled across the whole map by the developer controls. Every write
//! clamps into range; nothing here treats an out-of-range result as an
//! error.
//!
//! ```
//! use lifemap_logic::fog::FogModel;
//!
//! let mut fog = FogModel::from_levels([("a", 50), ("b", 30)]);
//! fog.relieve("a", 15).unwrap();
//! assert_eq!(fog.level("a"), Some(35));
//! assert_eq!(fog.level("b"), Some(30));
//! ```

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FogConfig;
use crate::constants::fog::{MAX_LEVEL, MIN_LEVEL};
use crate::error::LifeMapError;

/// Mapping from node id to fog level, keyed by the startup node set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogModel {
    levels: BTreeMap<String, u8>,
}

fn clamp_level(value: i32) -> u8 {
    value.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8
}

impl FogModel {
    /// Seed every node with a level drawn from `initial_min..initial_max`.
    pub fn initialize<'a>(
        node_ids: impl IntoIterator<Item = &'a str>,
        config: &FogConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let levels = node_ids
            .into_iter()
            .map(|id| {
                let level = if config.initial_min < config.initial_max {
                    rng.gen_range(config.initial_min..config.initial_max)
                } else {
                    config.initial_min
                };
                (id.to_string(), level.min(MAX_LEVEL))
            })
            .collect();
        Self { levels }
    }

    /// Build a model from explicit levels, clamping each.
    pub fn from_levels<K: Into<String>>(levels: impl IntoIterator<Item = (K, i32)>) -> Self {
        Self {
            levels: levels
                .into_iter()
                .map(|(id, level)| (id.into(), clamp_level(level)))
                .collect(),
        }
    }

    pub fn level(&self, node_id: &str) -> Option<u8> {
        self.levels.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.levels.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate `(node_id, level)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.levels.iter().map(|(id, level)| (id.as_str(), *level))
    }

    /// Mean level across all nodes, 0.0 for an empty model.
    pub fn average(&self) -> f32 {
        if self.levels.is_empty() {
            return 0.0;
        }
        let total: u32 = self.levels.values().map(|&l| l as u32).sum();
        total as f32 / self.levels.len() as f32
    }

    fn slot(&mut self, node_id: &str) -> Result<&mut u8, LifeMapError> {
        self.levels
            .get_mut(node_id)
            .ok_or_else(|| LifeMapError::UnknownNode(node_id.to_string()))
    }

    /// Set one node's level directly, clamped. Returns the stored level.
    pub fn set_level(&mut self, node_id: &str, value: i32) -> Result<u8, LifeMapError> {
        let slot = self.slot(node_id)?;
        *slot = clamp_level(value);
        Ok(*slot)
    }

    /// Lower one node's level by `amount`, flooring at zero.
    pub fn relieve(&mut self, node_id: &str, amount: u8) -> Result<u8, LifeMapError> {
        let slot = self.slot(node_id)?;
        *slot = slot.saturating_sub(amount);
        Ok(*slot)
    }

    /// Shift every level by `delta`, clamped.
    pub fn adjust_all(&mut self, delta: i32) {
        for level in self.levels.values_mut() {
            *level = clamp_level((*level as i32).saturating_add(delta));
        }
        log::debug!("fog adjusted by {} across {} nodes", delta, self.levels.len());
    }

    /// Replace every level with a fresh draw from `0..100`.
    pub fn randomize_all(&mut self, rng: &mut impl Rng) {
        for level in self.levels.values_mut() {
            *level = rng.gen_range(MIN_LEVEL..MAX_LEVEL);
        }
        log::debug!("fog randomized across {} nodes", self.levels.len());
    }
}

/// Whether a level hides the node's identity (strictly above the threshold).
pub fn is_foggy(level: u8, config: &FogConfig) -> bool {
    level > config.foggy_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn two_nodes() -> FogModel {
        FogModel::from_levels([("a", 50), ("b", 40)])
    }

    #[test]
    fn initialize_draws_within_range() {
        let ids: Vec<String> = (0..200).map(|i| format!("n{i}")).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let fog = FogModel::initialize(ids.iter().map(String::as_str), &FogConfig::default(), &mut rng);
        assert_eq!(fog.len(), 200);
        for (_, level) in fog.iter() {
            assert!((20..60).contains(&level), "level {level} outside [20,60)");
        }
    }

    #[test]
    fn initialize_keys_match_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let fog = FogModel::initialize(["x", "y", "z"], &FogConfig::default(), &mut rng);
        let keys: Vec<_> = fog.iter().map(|(id, _)| id).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn from_levels_clamps() {
        let fog = FogModel::from_levels([("lo", -5), ("hi", 250)]);
        assert_eq!(fog.level("lo"), Some(0));
        assert_eq!(fog.level("hi"), Some(100));
    }

    #[test]
    fn set_level_clamps() {
        let mut fog = two_nodes();
        assert_eq!(fog.set_level("a", 130), Ok(100));
        assert_eq!(fog.set_level("a", -1), Ok(0));
        assert_eq!(fog.set_level("a", 72), Ok(72));
    }

    #[test]
    fn relieve_only_touches_target() {
        let mut fog = two_nodes();
        assert_eq!(fog.relieve("a", 15), Ok(35));
        assert_eq!(fog.level("b"), Some(40));
    }

    #[test]
    fn repeated_relief_floors_at_zero() {
        let mut fog = two_nodes();
        for _ in 0..4 {
            fog.relieve("a", 15).unwrap();
        }
        assert_eq!(fog.level("a"), Some(0));
    }

    #[test]
    fn unknown_node_is_reported_and_ignored() {
        let mut fog = two_nodes();
        let before = fog.clone();
        assert_eq!(
            fog.relieve("ghost", 15),
            Err(LifeMapError::UnknownNode("ghost".into()))
        );
        assert!(fog.set_level("ghost", 10).is_err());
        assert_eq!(fog, before);
        assert!(!fog.contains("ghost"));
    }

    #[test]
    fn adjust_all_saturates() {
        let mut fog = two_nodes();
        fog.adjust_all(200);
        assert!(fog.iter().all(|(_, l)| l == 100));
        fog.adjust_all(-200);
        assert!(fog.iter().all(|(_, l)| l == 0));
    }

    #[test]
    fn adjust_all_shifts_uniformly() {
        let mut fog = two_nodes();
        fog.adjust_all(-10);
        assert_eq!(fog.level("a"), Some(40));
        assert_eq!(fog.level("b"), Some(30));
    }

    #[test]
    fn randomize_keeps_keys_and_range() {
        let mut fog = two_nodes();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            fog.randomize_all(&mut rng);
            assert_eq!(fog.len(), 2);
            assert!(fog.iter().all(|(_, l)| l < 100));
        }
    }

    #[test]
    fn foggy_boundary_at_sixty() {
        let config = FogConfig::default();
        assert!(!is_foggy(60, &config));
        assert!(is_foggy(61, &config));
        assert!(!is_foggy(0, &config));
        assert!(is_foggy(100, &config));
    }

    #[test]
    fn average_of_levels() {
        assert_eq!(two_nodes().average(), 45.0);
        assert_eq!(FogModel::default().average(), 0.0);
    }

    #[test]
    fn extreme_adjustments_saturate_without_overflow() {
        let mut fog = FogModel::from_levels([("a", 50), ("b", 0), ("c", 100)]);
        fog.adjust_all(i32::MAX);
        assert!(fog.iter().all(|(_, l)| l == 100));
        fog.adjust_all(i32::MIN);
        assert!(fog.iter().all(|(_, l)| l == 0));
    }
}
