//! Coordinate grid: maps (lane, side, slot) to pixel cells and back.
//!
//! The layout is a pure function of `GridConfig`. It is computed once per
//! battle into a cell table and only read afterwards.
//!
//! Horizontally, from left to right:
//!
//! ```text
//! | left castle | left slots 0..n | no-man's-land | right slots 0..n | right castle |
//! ```
//!
//! Left slot 0 sits against the left castle. Right slot 0 sits against
//! no-man's-land, i.e. nearest the battlefield centre. Lane rows share one
//! height, so lane index maps linearly to `y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use battle_core::constants::*;
use battle_core::enums::{Lane, Side};
use battle_core::error::{BattleError, Result};
use battle_core::types::{Bounds, Position};

/// Static geometry of the battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_width: f32,
    pub cell_height: f32,
    pub slots_per_lane: usize,
    pub no_mans_land_width: f32,
    pub castle_width: f32,
    pub top_margin: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            slots_per_lane: SLOTS_PER_LANE,
            no_mans_land_width: NO_MANS_LAND_WIDTH,
            castle_width: CASTLE_WIDTH,
            top_margin: GRID_TOP_MARGIN,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            self.cell_width,
            self.cell_height,
            self.no_mans_land_width,
            self.castle_width,
        ];
        if lengths.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(BattleError::InvalidConfig("grid lengths must be positive"));
        }
        if !self.top_margin.is_finite() || self.top_margin < 0.0 {
            return Err(BattleError::InvalidConfig("grid top margin must be non-negative"));
        }
        if self.slots_per_lane == 0 {
            return Err(BattleError::InvalidConfig("grid needs at least one slot per lane"));
        }
        if self.no_mans_land_width <= 2.0 * DEFENDER_PATROL_OFFSET {
            return Err(BattleError::InvalidConfig(
                "no-man's-land too narrow for the defender columns",
            ));
        }
        Ok(())
    }

    /// Width of one side's token field.
    fn field_width(&self) -> f32 {
        self.slots_per_lane as f32 * self.cell_width
    }
}

/// One token slot. Derived from the layout, never stored in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub side: Side,
    pub lane: Lane,
    pub slot: usize,
    pub center: Vec2,
    pub bounds: Bounds,
}

/// Precomputed cell table for a `GridConfig`.
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: GridConfig,
    /// Indexed by `side * LANE_COUNT * slots + lane * slots + slot`.
    cells: Vec<GridCell>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::build(GridConfig::default())
    }
}

impl GridLayout {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GridConfig) -> Self {
        let slots = config.slots_per_lane;
        let mut cells = Vec::with_capacity(2 * LANE_COUNT * slots);
        for side in Side::BOTH {
            let field_x = match side {
                Side::Left => config.castle_width,
                Side::Right => {
                    config.castle_width + config.field_width() + config.no_mans_land_width
                }
            };
            for lane in Lane::ALL {
                let min_y = config.top_margin + lane.index() as f32 * config.cell_height;
                for slot in 0..slots {
                    let min = Vec2::new(field_x + slot as f32 * config.cell_width, min_y);
                    let bounds = Bounds {
                        min,
                        max: min + Vec2::new(config.cell_width, config.cell_height),
                    };
                    cells.push(GridCell {
                        side,
                        lane,
                        slot,
                        center: bounds.center(),
                        bounds,
                    });
                }
            }
        }
        Self { config, cells }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn slots_per_lane(&self) -> usize {
        self.config.slots_per_lane
    }

    /// Full battlefield width.
    pub fn width(&self) -> f32 {
        2.0 * (self.config.castle_width + self.config.field_width())
            + self.config.no_mans_land_width
    }

    /// Cell for a slot. Out-of-range slots are a configuration error.
    pub fn cell(&self, lane: Lane, side: Side, slot: usize) -> Result<&GridCell> {
        let slots = self.config.slots_per_lane;
        if slot >= slots {
            return Err(BattleError::SlotOutOfRange {
                slot,
                capacity: slots,
            });
        }
        let index = side.index() * LANE_COUNT * slots + lane.index() * slots + slot;
        Ok(&self.cells[index])
    }

    /// Pixel centre of a slot.
    pub fn cell_position(&self, lane: Lane, side: Side, slot: usize) -> Result<Position> {
        self.cell(lane, side, slot).map(|c| Position(c.center))
    }

    /// Hit-test a point against one lane of one side.
    pub fn cell_at(&self, x: f32, y: f32, lane: Lane, side: Side) -> Option<&GridCell> {
        let point = Vec2::new(x, y);
        let first = self.cell(lane, side, 0).ok()?;
        if y < first.bounds.min.y || y >= first.bounds.max.y {
            return None;
        }
        let offset = x - first.bounds.min.x;
        if offset < 0.0 {
            return None;
        }
        let slot = (offset / self.config.cell_width).floor() as usize;
        self.cell(lane, side, slot)
            .ok()
            .filter(|cell| cell.bounds.contains(point))
    }

    /// Vertical centre of a lane row.
    pub fn lane_center_y(&self, lane: Lane) -> f32 {
        self.config.top_margin + (lane.index() as f32 + 0.5) * self.config.cell_height
    }

    /// Lane whose row is closest to `y`, clamped to the outer lanes.
    pub fn nearest_lane(&self, y: f32) -> Lane {
        let row = ((y - self.config.top_margin) / self.config.cell_height).floor();
        let index = row.clamp(0.0, (LANE_COUNT - 1) as f32) as usize;
        Lane::ALL[index]
    }

    /// Castle weapon slot of `side` in `lane`: where its attacks spawn and
    /// where the opponent's attacks terminate.
    pub fn weapon_slot(&self, lane: Lane, side: Side) -> Position {
        let x = match side {
            Side::Left => self.config.castle_width * 0.5,
            Side::Right => self.width() - self.config.castle_width * 0.5,
        };
        Position::new(x, self.lane_center_y(lane))
    }

    /// Column on which `side`'s roaming defender patrols, just in front of
    /// its token field.
    pub fn defender_column_x(&self, side: Side) -> f32 {
        let inner_edge = self.config.castle_width + self.config.field_width();
        match side {
            Side::Left => inner_edge + DEFENDER_PATROL_OFFSET,
            Side::Right => inner_edge + self.config.no_mans_land_width - DEFENDER_PATROL_OFFSET,
        }
    }
}
