//! Draw-list output for an external rasterizer
//!
//! Drawing itself happens outside this crate; these modules only describe
//! what to draw as plain, GPU-uploadable instances.

pub mod shapes;
pub mod vertex;

pub use shapes::{DrawList, draw_list};
pub use vertex::{DiscInstance, LineInstance, RectInstance};
