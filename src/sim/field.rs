//! Trash field
//!
//! The fixed population of trash items. Items are never removed: collecting
//! one moves it somewhere else, so the count stays constant for the session.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{TrashItem, TrashKind};
use crate::ground_distance;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrashField {
    items: Vec<TrashItem>,
    /// Spawn area half-size on x and z
    half_extent: f32,
    /// Resting height of items
    height: f32,
}

impl TrashField {
    pub fn new(half_extent: f32, height: f32) -> Self {
        Self {
            items: Vec::new(),
            half_extent,
            height,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.world_half_extent, tuning.trash_height)
    }

    /// Replace the field with `count` fresh items.
    ///
    /// Each item is rare independently with probability `rare_chance`.
    pub fn populate<R: Rng>(&mut self, count: usize, rare_chance: f32, tuning: &Tuning, rng: &mut R) {
        self.items.clear();
        self.items.reserve(count);
        for id in 0..count as u32 {
            let kind = if rng.random::<f32>() < rare_chance {
                TrashKind::Rare
            } else {
                TrashKind::Common
            };
            let position = self.random_position(rng);
            self.items.push(TrashItem {
                id,
                kind,
                score_value: kind.score_value(tuning),
                position,
            });
        }
    }

    /// Uniform spot inside the spawn area
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let x = (rng.random::<f32>() - 0.5) * 2.0 * self.half_extent;
        let z = (rng.random::<f32>() - 0.5) * 2.0 * self.half_extent;
        Vec3::new(x, self.height, z)
    }

    /// Move an item to a new random spot, returning its previous position
    pub fn reposition<R: Rng>(&mut self, id: u32, rng: &mut R) -> Option<Vec3> {
        let new_position = self.random_position(rng);
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        let old = item.position;
        item.position = new_position;
        Some(old)
    }

    pub fn get(&self, id: u32) -> Option<&TrashItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[TrashItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rare_count(&self) -> usize {
        self.items.iter().filter(|i| i.kind == TrashKind::Rare).count()
    }

    /// Ids of items within `radius` of `point` on the ground plane
    pub fn in_reach(&self, point: Vec3, radius: f32) -> Vec<u32> {
        self.items
            .iter()
            .filter(|i| ground_distance(i.position, point) <= radius)
            .map(|i| i.id)
            .collect()
    }

    /// Closest item on the ground plane
    pub fn nearest(&self, point: Vec3) -> Option<&TrashItem> {
        self.items.iter().min_by(|a, b| {
            ground_distance(a.position, point)
                .partial_cmp(&ground_distance(b.position, point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
