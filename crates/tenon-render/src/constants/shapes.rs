//! Precomputed shape path fragments.
//!
//! A shape pairs nominal dimensions with the path fragments that draw it in
//! each direction the outline needs. Fixed shapes are computed once by
//! [`super::ConstantProvider::init`]; dynamic shapes expose their dimensions
//! and paths as functions of the height of the part they attach to.

use std::fmt;
use std::rc::Rc;

use crate::paths;

/// The zig-zag marking a collapsed block's truncated right edge.
#[derive(Debug, Clone)]
pub struct JaggedTeeth {
    pub width: f32,
    pub height: f32,
    pub path: String,
}

/// The rounded cap drawn above a start block's top row.
#[derive(Debug, Clone)]
pub struct StartHat {
    pub width: f32,
    pub height: f32,
    pub path: String,
}

/// The shape of value connections: a rounded tab pointing left.
///
/// `path_up` and `path_down` are exact vertical mirrors of each other, so
/// the one definition serves output connections (drawn upward along the left
/// edge) and inline/external inputs (drawn downward).
#[derive(Debug, Clone)]
pub struct PuzzleTab {
    pub width: f32,
    pub height: f32,
    pub path_up: String,
    pub path_down: String,
}

/// The shape of statement connections.
#[derive(Debug, Clone)]
pub struct Notch {
    pub width: f32,
    pub height: f32,
    pub path_left: String,
    pub path_right: String,
}

/// Concave corners where a statement input meets the block body.
#[derive(Debug, Clone)]
pub struct InsideCorners {
    pub width: f32,
    pub height: f32,
    pub path_top: String,
    pub path_bottom: String,
    pub right_width: f32,
    pub right_height: f32,
    pub path_top_right: String,
    pub path_bottom_right: String,
}

/// Convex corners of the block outline.
#[derive(Debug, Clone)]
pub struct OutsideCorners {
    pub top_left: String,
    pub top_right: String,
    pub bottom_right: String,
    pub bottom_left: String,
    pub right_height: f32,
}

/// A connection shape whose dimensions are functions of the height of the
/// input or block it attaches to.
pub trait DynamicShape: fmt::Debug {
    fn width(&self, block_height: f32) -> f32;
    fn height(&self, block_height: f32) -> f32;
    fn connection_offset_y(&self, connection_height: f32) -> f32;
    fn connection_offset_x(&self, connection_width: f32) -> f32;
    fn path_down(&self, block_height: f32) -> String;
    fn path_up(&self, block_height: f32) -> String;
    fn path_right_down(&self, block_height: f32) -> String;
}

/// The shape assigned to a connection by
/// [`super::ConstantProvider::shape_for`].
#[derive(Debug, Clone)]
pub enum ConnectionShape {
    PuzzleTab(Rc<PuzzleTab>),
    Notch(Rc<Notch>),
    Dynamic(Rc<dyn DynamicShape>),
}

impl ConnectionShape {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ConnectionShape::Dynamic(_))
    }

    /// Nominal width; zero for dynamic shapes, whose width depends on
    /// context.
    pub fn fixed_width(&self) -> f32 {
        match self {
            ConnectionShape::PuzzleTab(tab) => tab.width,
            ConnectionShape::Notch(notch) => notch.width,
            ConnectionShape::Dynamic(_) => 0.0,
        }
    }

    /// Nominal height; zero for dynamic shapes.
    pub fn fixed_height(&self) -> f32 {
        match self {
            ConnectionShape::PuzzleTab(tab) => tab.height,
            ConnectionShape::Notch(notch) => notch.height,
            ConnectionShape::Dynamic(_) => 0.0,
        }
    }

    /// Width for a part of the given height.
    pub fn width_for(&self, block_height: f32) -> f32 {
        match self {
            ConnectionShape::Dynamic(shape) => shape.width(block_height),
            _ => self.fixed_width(),
        }
    }

    /// Height for a part of the given height.
    pub fn height_for(&self, block_height: f32) -> f32 {
        match self {
            ConnectionShape::Dynamic(shape) => shape.height(block_height),
            _ => self.fixed_height(),
        }
    }

    /// The downward path, for inputs cut into the outline.
    pub fn path_down(&self, block_height: f32) -> String {
        match self {
            ConnectionShape::PuzzleTab(tab) => tab.path_down.clone(),
            ConnectionShape::Notch(notch) => notch.path_left.clone(),
            ConnectionShape::Dynamic(shape) => shape.path_down(block_height),
        }
    }

    /// The upward path, for output connections on the left edge.
    pub fn path_up(&self, block_height: f32) -> String {
        match self {
            ConnectionShape::PuzzleTab(tab) => tab.path_up.clone(),
            ConnectionShape::Notch(notch) => notch.path_right.clone(),
            ConnectionShape::Dynamic(shape) => shape.path_up(block_height),
        }
    }
}

/// The complete shape set a constant provider works from after `init`.
#[derive(Debug, Clone)]
pub struct ShapeSet {
    pub jagged_teeth: JaggedTeeth,
    pub notch: Rc<Notch>,
    pub start_hat: StartHat,
    pub puzzle_tab: Rc<PuzzleTab>,
    pub inside_corners: InsideCorners,
    pub outside_corners: OutsideCorners,
    /// Dynamic value-connection shapes; present only on renderers that use
    /// them.
    pub hexagonal: Option<Rc<dyn DynamicShape>>,
    pub rounded: Option<Rc<dyn DynamicShape>>,
    pub squared: Option<Rc<dyn DynamicShape>>,
}

pub(crate) fn make_jagged_teeth(width: f32, height: f32) -> JaggedTeeth {
    let path = paths::line(&[
        paths::point(width, height / 4.0),
        paths::point(-width * 2.0, height / 2.0),
        paths::point(width, height / 4.0),
    ]);
    JaggedTeeth { width, height, path }
}

pub(crate) fn make_start_hat(width: f32, height: f32) -> StartHat {
    let path = paths::curve(
        "c",
        &[
            paths::point(30.0, -height),
            paths::point(70.0, -height),
            paths::point(width, 0.0),
        ],
    );
    StartHat { width, height, path }
}

pub(crate) fn make_puzzle_tab(width: f32, height: f32) -> PuzzleTab {
    // The tab is two joined curves whose 'up' and 'down' renditions differ
    // only in the sign of every y-coordinate.
    let make_main_path = |up: bool| -> String {
        let forward = if up { -1.0f32 } else { 1.0 };
        let back = -forward;

        let overlap = 2.5;
        let half_height = height / 2.0;
        let control1_y = half_height + overlap;
        let control2_y = half_height + 0.5;
        let control3_y = overlap;

        paths::curve(
            "c",
            &[
                paths::point(0.0, forward * control1_y),
                paths::point(-width, back * control2_y),
                paths::point(-width, forward * half_height),
            ],
        ) + &paths::curve(
            "s",
            &[
                paths::point(width, back * control3_y),
                paths::point(width, forward * half_height),
            ],
        )
    };

    PuzzleTab {
        width,
        height,
        path_up: make_main_path(true),
        path_down: make_main_path(false),
    }
}

pub(crate) fn make_notch(width: f32, height: f32) -> Notch {
    let inner_width = 3.0;
    let outer_width = (width - inner_width) / 2.0;

    let make_main_path = |dir: f32| -> String {
        paths::line(&[
            paths::point(dir * outer_width, height),
            paths::point(dir * inner_width, 0.0),
            paths::point(dir * outer_width, -height),
        ])
    };

    Notch {
        width,
        height,
        path_left: make_main_path(1.0),
        path_right: make_main_path(-1.0),
    }
}

pub(crate) fn make_inside_corners(radius: f32) -> InsideCorners {
    InsideCorners {
        width: radius,
        height: radius,
        path_top: paths::arc("a", "0 0,0", radius, &paths::point(-radius, radius)),
        path_bottom: paths::arc("a", "0 0,0", radius, &paths::point(radius, radius)),
        right_width: radius,
        right_height: radius,
        path_top_right: paths::arc("a", "0 0,1", radius, &paths::point(-radius, radius)),
        path_bottom_right: paths::arc("a", "0 0,1", radius, &paths::point(radius, radius)),
    }
}

pub(crate) fn make_outside_corners(radius: f32) -> OutsideCorners {
    OutsideCorners {
        top_left: paths::move_by(0.0, radius)
            + &paths::arc("a", "0 0,1", radius, &paths::point(radius, -radius)),
        top_right: paths::arc("a", "0 0,1", radius, &paths::point(radius, radius)),
        bottom_right: paths::arc("a", "0 0,1", radius, &paths::point(-radius, radius)),
        bottom_left: paths::arc("a", "0 0,1", radius, &paths::point(-radius, -radius)),
        right_height: radius,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Splits a path fragment into numeric tokens, keeping command letters
    /// out of the comparison.
    fn numbers(path: &str) -> Vec<f32> {
        path.split(|c: char| c == ' ' || c == ',')
            .filter_map(|tok| tok.parse::<f32>().ok())
            .collect()
    }

    #[test]
    fn test_puzzle_tab_paths_mirror_vertically() {
        let tab = make_puzzle_tab(8.0, 15.0);
        let up = numbers(&tab.path_up);
        let down = numbers(&tab.path_down);
        assert_eq!(up.len(), down.len());
        // Coordinates alternate x,y; every y flips sign, every x matches.
        for (i, (u, d)) in up.iter().zip(down.iter()).enumerate() {
            if i % 2 == 0 {
                assert_eq!(u, d, "x coordinate {i} diverged");
            } else {
                assert_eq!(*u, -d, "y coordinate {i} is not mirrored");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_puzzle_tab_mirrors_for_any_size(
            width in 1.0f32..64.0,
            height in 1.0f32..64.0,
        ) {
            let tab = make_puzzle_tab(width, height);
            let up = numbers(&tab.path_up);
            let down = numbers(&tab.path_down);
            prop_assert_eq!(up.len(), down.len());
            for (i, (u, d)) in up.iter().zip(down.iter()).enumerate() {
                if i % 2 == 0 {
                    prop_assert_eq!(*u, *d);
                } else {
                    prop_assert_eq!(*u, -*d);
                }
            }
        }
    }

    #[test]
    fn test_puzzle_tab_exact_default_path() {
        let tab = make_puzzle_tab(8.0, 15.0);
        assert_eq!(tab.path_down, " c 0,10  -8,-8  -8,7.5  s 8,-2.5  8,7.5 ");
        assert_eq!(tab.path_up, " c 0,-10  -8,8  -8,-7.5  s 8,2.5  8,-7.5 ");
    }

    #[test]
    fn test_notch_paths_are_horizontal_mirrors() {
        let notch = make_notch(15.0, 4.0);
        assert_eq!(notch.path_left, " l 6,4  3,0  6,-4 ");
        assert_eq!(notch.path_right, " l -6,4  -3,0  -6,-4 ");
    }

    #[test]
    fn test_jagged_teeth_nets_to_full_height() {
        let teeth = make_jagged_teeth(6.0, 12.0);
        let nums = numbers(&teeth.path);
        let dx: f32 = nums.iter().step_by(2).sum();
        let dy: f32 = nums.iter().skip(1).step_by(2).sum();
        assert_eq!(dx, 0.0);
        assert_eq!(dy, teeth.height);
    }

    #[test]
    fn test_start_hat_returns_to_capline() {
        let hat = make_start_hat(100.0, 15.0);
        assert_eq!(hat.path, " c 30,-15  70,-15  100,0 ");
    }

    #[test]
    fn test_connection_shape_dimensions() {
        let tab = ConnectionShape::PuzzleTab(Rc::new(make_puzzle_tab(8.0, 15.0)));
        assert!(!tab.is_dynamic());
        assert_eq!(tab.fixed_width(), 8.0);
        assert_eq!(tab.width_for(100.0), 8.0);

        let notch = ConnectionShape::Notch(Rc::new(make_notch(15.0, 4.0)));
        assert_eq!(notch.fixed_height(), 4.0);
    }
}
