//! The city view's plot map. Each finished session erects one building whose
//! value is the highest tile reached, on a random plot of a 5x5 map.

use crate::engine::Tile;
use crate::tiers::BuildingTier;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

pub const CITY_GRID_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPlot {
    pub id: u64,
    pub x: usize,
    pub y: usize,
    pub building_value: Tile,
    pub owner_name: String,
    pub timestamp: u64,
}

impl CityPlot {
    pub fn tier(&self) -> Option<BuildingTier> { BuildingTier::from_value(self.building_value) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    plots: Vec<CityPlot>,
    next_id: u64,
}

impl City {
    pub fn new() -> Self { Self::default() }

    /// The lobby city shown before anyone has played: four plots raised by other architects.
    pub fn with_demo_plots() -> Self {
        let timestamp = now_unix_seconds();
        let plots: Vec<CityPlot> = [
            (2, 3, 512, "Kim (Design Team 1)"),
            (1, 1, 128, "Lee (Design Intern)"),
            (3, 3, 1024, "Park (CEO)"),
            (0, 4, 256, "Choi (Dev Team Lead)"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((x, y, building_value, owner), id)| CityPlot {
            id,
            x,
            y,
            building_value,
            owner_name: owner.to_string(),
            timestamp,
        })
        .collect();
        let next_id = plots.len() as u64;
        City { plots, next_id }
    }

    /// Place a building on a uniformly random plot, replacing whatever stood there.
    pub fn build<R: Rng + ?Sized>(&mut self, building_value: Tile, owner: impl Into<String>, rng: &mut R) -> &CityPlot {
        let x = rng.gen_range(0..CITY_GRID_SIZE);
        let y = rng.gen_range(0..CITY_GRID_SIZE);
        let before = self.plots.len();
        self.plots.retain(|p| p.x != x || p.y != y);
        let replaced = before != self.plots.len();

        self.next_id += 1;
        let plot = CityPlot {
            id: self.next_id,
            x,
            y,
            building_value,
            owner_name: owner.into(),
            timestamp: now_unix_seconds(),
        };
        info!(id = plot.id, x, y, building_value, replaced, "building placed");
        self.plots.push(plot);
        &self.plots[self.plots.len() - 1]
    }

    pub fn plot_at(&self, x: usize, y: usize) -> Option<&CityPlot> {
        self.plots.iter().find(|p| p.x == x && p.y == y)
    }

    pub fn plots(&self) -> &[CityPlot] { &self.plots }

    pub fn len(&self) -> usize { self.plots.len() }

    pub fn is_empty(&self) -> bool { self.plots.is_empty() }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..CITY_GRID_SIZE {
            let row: Vec<String> = (0..CITY_GRID_SIZE)
                .map(|x| match self.plot_at(x, y) {
                    Some(p) => p.tier().and_then(|t| t.label().chars().next()).unwrap_or('?'),
                    None => '.',
                })
                .map(String::from)
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

fn now_unix_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
