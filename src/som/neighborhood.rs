//! Neighborhood strategies for the map lattice.

use crate::error::{KohonetError, Result};
use serde::{Deserialize, Serialize};

/// Grid geometry used to find a winner's neighbors.
///
/// Selected once at configuration time; the engine never switches
/// geometry mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Nodes form a line; neighbors sit left and right of the winner.
    Line,
    /// Nodes form a square grid in row-major order; neighbors sit within
    /// Manhattan distance of the winner.
    #[default]
    Grid,
}

/// Side length of a square map, or an error for non-square sizes.
fn grid_side(map_size: usize) -> Result<usize> {
    let side = (map_size as f64).sqrt().round() as usize;
    if side * side != map_size {
        return Err(KohonetError::NonSquareMap(map_size));
    }
    Ok(side)
}

impl Neighborhood {
    /// Checks that a map of the given size can back this geometry.
    pub fn validate(&self, map_size: usize) -> Result<()> {
        if let Neighborhood::Grid = self {
            grid_side(map_size)?;
        }
        Ok(())
    }

    /// Returns the winner's neighbors as `(index, grid_distance)` pairs.
    ///
    /// The tag is the topological offset plus one, so the update rule's
    /// inverse-distance factor is 1/2 for immediate neighbors, 1/3 for
    /// the next ring, and so on. The winner itself is not included.
    pub fn neighbors(
        &self,
        winner: usize,
        map_size: usize,
        radius: usize,
    ) -> Result<Vec<(usize, usize)>> {
        let mut found = Vec::new();

        match self {
            Neighborhood::Line => {
                for offset in 1..=radius {
                    if let Some(left) = winner.checked_sub(offset) {
                        found.push((left, offset + 1));
                    }
                    let right = winner + offset;
                    if right < map_size {
                        found.push((right, offset + 1));
                    }
                }
            }
            Neighborhood::Grid => {
                let side = grid_side(map_size)?;
                let (row, col) = (winner / side, winner % side);

                for index in 0..map_size {
                    if index == winner {
                        continue;
                    }
                    let (r, c) = (index / side, index % side);
                    let distance = row.abs_diff(r) + col.abs_diff(c);
                    if distance <= radius {
                        found.push((index, distance + 1));
                    }
                }
            }
        }

        Ok(found)
    }
}
