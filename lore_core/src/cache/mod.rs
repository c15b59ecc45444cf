//! StatsCache - concurrent per-player stat storage

use crate::stats::PlayerStats;
use crate::types::PlayerId;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{PoisonError, RwLock};

const SHARD_COUNT: usize = 16;

/// Concurrent map from player identity to the latest computed stats.
///
/// Keys are dispatched over a fixed set of independently locked shards, so
/// writes for unrelated players do not contend and no global lock exists.
/// Stored bundles are immutable; a `put` replaces the whole value, so a
/// concurrent `get` only ever observes a complete bundle.
#[derive(Debug)]
pub struct StatsCache {
    shards: Vec<RwLock<HashMap<PlayerId, PlayerStats>>>,
}

impl StatsCache {
    pub fn new() -> Self {
        StatsCache {
            shards: (0..SHARD_COUNT)
                .map(|_| RwLock::new(HashMap::new()))
                .collect(),
        }
    }

    fn shard(&self, player_id: &PlayerId) -> &RwLock<HashMap<PlayerId, PlayerStats>> {
        let mut hasher = DefaultHasher::new();
        player_id.hash(&mut hasher);
        &self.shards[hasher.finish() as usize % SHARD_COUNT]
    }

    /// Store a player's stats, replacing any previous entry.
    pub fn put(&self, stats: PlayerStats) {
        let shard = self.shard(&stats.player_id());
        let mut map = shard.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(stats.player_id(), stats);
    }

    /// Look up a player's stats.
    pub fn get(&self, player_id: PlayerId) -> Option<PlayerStats> {
        let map = self
            .shard(&player_id)
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.get(&player_id).cloned()
    }

    /// Look up a player's stats, falling back to an empty bundle.
    pub fn get_or_empty(&self, player_id: PlayerId) -> PlayerStats {
        self.get(player_id)
            .unwrap_or_else(|| PlayerStats::empty(player_id))
    }

    /// Remove a player's entry, returning it if present.
    pub fn remove(&self, player_id: PlayerId) -> Option<PlayerStats> {
        let mut map = self
            .shard(&player_id)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        map.remove(&player_id)
    }

    /// Whether the player has a cached entry.
    pub fn contains(&self, player_id: PlayerId) -> bool {
        let map = self
            .shard(&player_id)
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.contains_key(&player_id)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    /// Number of cached players.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .len()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identities of every cached player.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.shards
            .iter()
            .flat_map(|shard| {
                shard
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .keys()
                    .copied()
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        StatsCache::new()
    }
}
