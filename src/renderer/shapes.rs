//! Draw list generation for the table, balls and drag guide

use glam::Vec2;

use super::vertex::{DiscInstance, LineInstance, RectInstance, colors};
use crate::consts::GUIDE_THICKNESS;
use crate::sim::{Simulation, Table};

/// Everything the rasterizer needs for one frame, back to front
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Felt then cushions
    pub rects: Vec<RectInstance>,
    pub pockets: Vec<DiscInstance>,
    /// Active balls only
    pub balls: Vec<DiscInstance>,
    pub guide: Option<LineInstance>,
}

/// Felt and cushion rectangles
pub fn table_rects(table: &Table) -> Vec<RectInstance> {
    let mut rects = Vec::with_capacity(5);
    rects.push(RectInstance::new(
        table.play_min(),
        table.play_max() - table.play_min(),
        colors::FELT,
    ));
    rects.extend(
        table
            .cushion_rects()
            .into_iter()
            .map(|(_, min, size)| RectInstance::new(min, size, colors::CUSHION)),
    );
    rects
}

/// Drag guide from `start` to `end`
pub fn guide_line(start: Vec2, end: Vec2) -> LineInstance {
    LineInstance {
        start: start.to_array(),
        end: end.to_array(),
        thickness: GUIDE_THICKNESS,
        color: colors::GUIDE,
    }
}

/// Build the draw list for the current table state
pub fn draw_list(sim: &Simulation) -> DrawList {
    let table = sim.table();
    DrawList {
        rects: table_rects(table),
        pockets: table
            .pockets
            .iter()
            .map(|p| DiscInstance::new(p.pos, p.radius, colors::POCKET))
            .collect(),
        balls: sim
            .bodies()
            .iter()
            .filter(|b| b.is_active())
            .map(|b| DiscInstance::new(b.pos, b.radius(), b.color))
            .collect(),
        guide: sim.drag_guide().map(|(start, end)| guide_line(start, end)),
    }
}
