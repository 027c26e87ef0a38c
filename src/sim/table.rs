//! Static table geometry: cushions and corner pockets
//!
//! The playable area is the rectangle `[wall, width - wall] x [wall, height - wall]`.
//! Each cushion is a band along one edge of the table. When pockets are
//! present, cushions stop one pocket radius short of each corner so balls
//! can roll into the pocket mouths.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::TableLayout;

/// One of the four cushions, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Left,
    Right,
    Bottom,
}

impl Wall {
    /// Cushions in the order they are tested against each ball
    pub const DETECTION_ORDER: [Wall; 4] = [Wall::Top, Wall::Left, Wall::Right, Wall::Bottom];

    /// Unit vector pointing from the cushion into the playable area
    pub fn inward(self) -> Vec2 {
        match self {
            Wall::Top => Vec2::Y,
            Wall::Left => Vec2::X,
            Wall::Right => Vec2::NEG_X,
            Wall::Bottom => Vec2::NEG_Y,
        }
    }
}

/// A circular capture zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    /// Center distance at or below which a ball of `ball_radius` drops in
    ///
    /// Deliberately generous: the ball only needs to cover half the pocket.
    #[inline]
    pub fn capture_distance(&self, ball_radius: f32) -> f32 {
        ball_radius + self.radius / 2.0
    }
}

/// Immutable table description for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Gap between each corner of the playable area and the cushion ends
    pub pocket_mouth: f32,
    /// Corner pockets: top-left, top-right, bottom-right, bottom-left
    pub pockets: Vec<Pocket>,
}

impl Table {
    pub fn from_layout(layout: &TableLayout) -> Self {
        let wall = layout.wall_thickness;
        let (w, h) = (layout.width, layout.height);
        let pockets = if layout.pockets {
            [
                Vec2::new(wall, wall),
                Vec2::new(w - wall, wall),
                Vec2::new(w - wall, h - wall),
                Vec2::new(wall, h - wall),
            ]
            .into_iter()
            .map(|pos| Pocket {
                pos,
                radius: layout.pocket_radius,
            })
            .collect()
        } else {
            Vec::new()
        };
        Self {
            width: w,
            height: h,
            wall_thickness: wall,
            pocket_mouth: if layout.pockets { layout.pocket_radius } else { 0.0 },
            pockets,
        }
    }

    /// Top-left corner of the playable area
    #[inline]
    pub fn play_min(&self) -> Vec2 {
        Vec2::splat(self.wall_thickness)
    }

    /// Bottom-right corner of the playable area
    #[inline]
    pub fn play_max(&self) -> Vec2 {
        Vec2::new(self.width - self.wall_thickness, self.height - self.wall_thickness)
    }

    /// Range along the cushion's own axis that the cushion covers
    fn cushion_span(&self, length: f32) -> (f32, f32) {
        let inset = self.wall_thickness + self.pocket_mouth;
        (inset, (length - inset).max(inset))
    }

    /// Closest point on a cushion band to `point`
    ///
    /// Top/bottom cushions clamp x to the cushion span and y to the wall band;
    /// left/right cushions are symmetric.
    pub fn clamp_to_wall(&self, wall: Wall, point: Vec2) -> Vec2 {
        let t = self.wall_thickness;
        let (x_lo, x_hi) = self.cushion_span(self.width);
        let (y_lo, y_hi) = self.cushion_span(self.height);
        match wall {
            Wall::Top => Vec2::new(point.x.clamp(x_lo, x_hi), point.y.clamp(0.0, t)),
            Wall::Bottom => Vec2::new(
                point.x.clamp(x_lo, x_hi),
                point.y.clamp(self.height - t, self.height),
            ),
            Wall::Left => Vec2::new(point.x.clamp(0.0, t), point.y.clamp(y_lo, y_hi)),
            Wall::Right => Vec2::new(
                point.x.clamp(self.width - t, self.width),
                point.y.clamp(y_lo, y_hi),
            ),
        }
    }

    /// Cushion rectangles as `(min, size)`, in detection order
    pub fn cushion_rects(&self) -> [(Wall, Vec2, Vec2); 4] {
        let t = self.wall_thickness;
        let (x_lo, x_hi) = self.cushion_span(self.width);
        let (y_lo, y_hi) = self.cushion_span(self.height);
        [
            (Wall::Top, Vec2::new(x_lo, 0.0), Vec2::new(x_hi - x_lo, t)),
            (Wall::Left, Vec2::new(0.0, y_lo), Vec2::new(t, y_hi - y_lo)),
            (
                Wall::Right,
                Vec2::new(self.width - t, y_lo),
                Vec2::new(t, y_hi - y_lo),
            ),
            (
                Wall::Bottom,
                Vec2::new(x_lo, self.height - t),
                Vec2::new(x_hi - x_lo, t),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_layout(&TableLayout::default())
    }

    #[test]
    fn test_default_table_has_corner_pockets() {
        let table = table();
        assert_eq!(table.pockets.len(), 4);
        assert_eq!(table.pockets[0].pos, Vec2::new(35.0, 35.0));
        assert_eq!(table.pockets[2].pos, Vec2::new(765.0, 565.0));
        assert_eq!(table.play_min(), Vec2::splat(35.0));
        assert_eq!(table.play_max(), Vec2::new(765.0, 565.0));
    }

    #[test]
    fn test_no_pockets_layout() {
        let layout = TableLayout {
            pockets: false,
            ..Default::default()
        };
        let table = Table::from_layout(&layout);
        assert!(table.pockets.is_empty());
        assert_eq!(table.pocket_mouth, 0.0);
        // Cushions span the whole playable edge
        let p = table.clamp_to_wall(Wall::Top, Vec2::new(40.0, 60.0));
        assert_eq!(p, Vec2::new(40.0, 35.0));
    }

    #[test]
    fn test_clamp_to_each_wall() {
        let table = table();
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(table.clamp_to_wall(Wall::Top, center), Vec2::new(400.0, 35.0));
        assert_eq!(table.clamp_to_wall(Wall::Bottom, center), Vec2::new(400.0, 565.0));
        assert_eq!(table.clamp_to_wall(Wall::Left, center), Vec2::new(35.0, 300.0));
        assert_eq!(table.clamp_to_wall(Wall::Right, center), Vec2::new(765.0, 300.0));
    }

    #[test]
    fn test_cushion_stops_at_pocket_mouth() {
        let table = table();
        let near_corner = Vec2::new(40.0, 50.0);
        assert_eq!(
            table.clamp_to_wall(Wall::Top, near_corner),
            Vec2::new(70.0, 35.0)
        );
        assert_eq!(
            table.clamp_to_wall(Wall::Left, near_corner),
            Vec2::new(35.0, 70.0)
        );
    }

    #[test]
    fn test_capture_distance() {
        let pocket = table().pockets[0];
        assert_eq!(pocket.capture_distance(25.0), 42.5);
    }

    #[test]
    fn test_inward_normals_point_into_table() {
        let table = table();
        let center = Vec2::new(table.width, table.height) / 2.0;
        for wall in Wall::DETECTION_ORDER {
            let on_wall = table.clamp_to_wall(wall, center);
            assert!((center - on_wall).dot(wall.inward()) > 0.0);
        }
    }
}
