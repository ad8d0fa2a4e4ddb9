//! The zelos renderer: the flat, grid-aligned look with dynamic connection
//! shapes.
//!
//! Zelos sizes everything in grid units of four, replaces the puzzle tab
//! with value shapes that grow with the block they attach to, and picks the
//! shape from the block's output-shape hint or its type checks.

use std::rc::Rc;

use tenon_core::model::{BlockLike, ConnectionKind, ConnectionLike, InputKind};

use crate::constants::shapes::{
    self, ConnectionShape, DynamicShape, JaggedTeeth, Notch, ShapeSet, StartHat,
};
use crate::constants::{ConstantProvider, Variant};
use crate::error::RenderError;
use crate::info::LayoutPolicy;
use crate::paths;

/// Output-shape hints blocks may carry to force a value shape.
pub const SHAPE_HEXAGONAL: i32 = 1;
pub const SHAPE_ROUND: i32 = 2;
pub const SHAPE_SQUARE: i32 = 3;
pub const SHAPE_PUZZLE: i32 = 4;
pub const SHAPE_NOTCH: i32 = 5;

const GRID_UNIT: f32 = 4.0;

/// A constant provider with the zelos renderer's values.
pub fn constants() -> ConstantProvider {
    let mut constants = ConstantProvider::new().with_variant(Variant::Zelos);
    constants.small_padding = GRID_UNIT;
    constants.medium_padding = 2.0 * GRID_UNIT;
    constants.medium_large_padding = 3.0 * GRID_UNIT;
    constants.large_padding = 4.0 * GRID_UNIT;
    constants.corner_radius = GRID_UNIT;
    constants.notch_width = 9.0 * GRID_UNIT;
    constants.notch_height = 2.0 * GRID_UNIT;
    constants.notch_offset_left = 3.0 * GRID_UNIT;
    // Re-derived from the inside corners during init.
    constants.statement_input_notch_offset = constants.notch_offset_left;
    constants.min_block_width = 2.0 * GRID_UNIT;
    constants.min_block_height = 12.0 * GRID_UNIT;
    constants.empty_statement_input_height = 6.0 * GRID_UNIT;
    constants.top_row_min_height = constants.corner_radius;
    constants.bottom_row_min_height = constants.corner_radius;
    constants.bottom_row_after_statement_min_height = 6.0 * GRID_UNIT;
    constants.statement_bottom_spacer = -constants.notch_height;
    constants.statement_input_padding_left = 4.0 * GRID_UNIT;
    constants.empty_inline_input_padding = 4.0 * GRID_UNIT;
    constants.empty_inline_input_height = 8.0 * GRID_UNIT;
    constants.dummy_input_min_height = 8.0 * GRID_UNIT;
    constants.dummy_input_shadow_min_height = 6.0 * GRID_UNIT;
    constants.max_dynamic_connection_shape_width = 12.0 * GRID_UNIT;
    constants.start_hat_width = 96.0;
    constants.start_hat_height = 22.0;
    // Collapsed zelos blocks keep a straight right edge.
    constants.jagged_teeth_width = 0.0;
    constants.jagged_teeth_height = 0.0;
    constants
}

pub(crate) fn build_shape_set(constants: &ConstantProvider) -> ShapeSet {
    let max_width = constants.max_dynamic_connection_shape_width;
    ShapeSet {
        jagged_teeth: JaggedTeeth {
            width: constants.jagged_teeth_width,
            height: constants.jagged_teeth_height,
            path: String::new(),
        },
        notch: Rc::new(make_notch(constants.notch_width, constants.notch_height)),
        start_hat: make_start_hat(constants.start_hat_width, constants.start_hat_height),
        puzzle_tab: Rc::new(shapes::make_puzzle_tab(
            constants.tab_width,
            constants.tab_height,
        )),
        inside_corners: shapes::make_inside_corners(constants.corner_radius),
        outside_corners: shapes::make_outside_corners(constants.corner_radius),
        hexagonal: Some(Rc::new(Hexagonal { max_width })),
        rounded: Some(Rc::new(Rounded {
            max_width,
            max_height: 2.0 * max_width,
        })),
        squared: Some(Rc::new(Squared {
            radius: constants.corner_radius,
        })),
    }
}

/// Picks the value shape from the output-shape hint, then from type checks.
pub(crate) fn shape_for(
    shape_set: &ShapeSet,
    connection: &dyn ConnectionLike,
    output_shape_hint: Option<i32>,
) -> Result<ConnectionShape, RenderError> {
    match connection.kind() {
        ConnectionKind::PreviousStatement | ConnectionKind::NextStatement => {
            Ok(ConnectionShape::Notch(shape_set.notch.clone()))
        }
        ConnectionKind::InputValue | ConnectionKind::OutputValue => {
            let hexagonal = shape_set
                .hexagonal
                .clone()
                .ok_or(RenderError::ShapesNotInitialized)?;
            let rounded = shape_set
                .rounded
                .clone()
                .ok_or(RenderError::ShapesNotInitialized)?;
            let squared = shape_set
                .squared
                .clone()
                .ok_or(RenderError::ShapesNotInitialized)?;

            match output_shape_hint {
                Some(SHAPE_HEXAGONAL) => return Ok(ConnectionShape::Dynamic(hexagonal)),
                Some(SHAPE_ROUND) => return Ok(ConnectionShape::Dynamic(rounded)),
                Some(SHAPE_SQUARE) => return Ok(ConnectionShape::Dynamic(squared)),
                _ => {}
            }

            // An unchecked connection borrows the checks of whatever it is
            // connected to.
            let checks = if !connection.checks().is_empty() {
                connection.checks()
            } else {
                connection
                    .target_block()
                    .and_then(|block| block.output_connection())
                    .map(|conn| conn.checks())
                    .unwrap_or(&[])
            };
            let has = |name: &str| checks.iter().any(|check| check == name);
            if has("Boolean") {
                Ok(ConnectionShape::Dynamic(hexagonal))
            } else if has("Number") || has("String") {
                Ok(ConnectionShape::Dynamic(rounded))
            } else {
                Ok(ConnectionShape::Dynamic(rounded))
            }
        }
    }
}

fn make_start_hat(width: f32, height: f32) -> StartHat {
    let path = paths::curve(
        "c",
        &[
            paths::point(25.0, -height),
            paths::point(71.0, -height),
            paths::point(width, 0.0),
        ],
    );
    StartHat { width, height, path }
}

fn make_notch(width: f32, height: f32) -> Notch {
    let inner_width = width / 3.0;
    let curve_width = inner_width / 3.0;
    let half_height = height / 2.0;
    let quarter_height = half_height / 2.0;

    let make_main_path = |dir: f32| -> String {
        paths::curve(
            "c",
            &[
                paths::point(dir * curve_width / 2.0, 0.0),
                paths::point(dir * curve_width * 3.0 / 4.0, quarter_height / 2.0),
                paths::point(dir * curve_width, quarter_height),
            ],
        ) + &paths::line(&[paths::point(dir * curve_width, half_height)])
            + &paths::curve(
                "c",
                &[
                    paths::point(dir * curve_width / 4.0, quarter_height / 2.0),
                    paths::point(dir * curve_width / 2.0, quarter_height),
                    paths::point(dir * curve_width, quarter_height),
                ],
            )
            + &paths::line_on_axis("h", dir * inner_width)
            + &paths::curve(
                "c",
                &[
                    paths::point(dir * curve_width / 2.0, 0.0),
                    paths::point(dir * curve_width * 3.0 / 4.0, -quarter_height / 2.0),
                    paths::point(dir * curve_width, -quarter_height),
                ],
            )
            + &paths::line(&[paths::point(dir * curve_width, -half_height)])
            + &paths::curve(
                "c",
                &[
                    paths::point(dir * curve_width / 4.0, -quarter_height / 2.0),
                    paths::point(dir * curve_width / 2.0, -quarter_height),
                    paths::point(dir * curve_width, -quarter_height),
                ],
            )
    };

    Notch {
        width,
        height,
        path_left: make_main_path(1.0),
        path_right: make_main_path(-1.0),
    }
}

/// The pointed value shape used for booleans.
#[derive(Debug)]
struct Hexagonal {
    max_width: f32,
}

impl Hexagonal {
    fn main_path(&self, height: f32, up: bool, right: bool) -> String {
        let width = self.width(height);
        let forward = if up { -1.0 } else { 1.0 };
        let direction = if right { -1.0 } else { 1.0 };
        let dy = forward * height / 2.0;
        paths::line_to(-direction * width, dy) + &paths::line_to(direction * width, dy)
    }
}

impl DynamicShape for Hexagonal {
    fn width(&self, block_height: f32) -> f32 {
        (block_height / 2.0).min(self.max_width)
    }

    fn height(&self, block_height: f32) -> f32 {
        block_height
    }

    fn connection_offset_y(&self, connection_height: f32) -> f32 {
        connection_height / 2.0
    }

    fn connection_offset_x(&self, connection_width: f32) -> f32 {
        -connection_width
    }

    fn path_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, false)
    }

    fn path_up(&self, block_height: f32) -> String {
        self.main_path(block_height, true, false)
    }

    fn path_right_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, true)
    }
}

/// The pill-shaped value shape used for numbers and strings. Past
/// `max_height` the arcs stop growing and a straight segment fills the rest.
#[derive(Debug)]
struct Rounded {
    max_width: f32,
    max_height: f32,
}

impl Rounded {
    fn main_path(&self, height: f32, up: bool, right: bool) -> String {
        let remaining = (height - self.max_height).max(0.0);
        let arc_height = height.min(self.max_height);
        let radius = arc_height / 2.0;
        let sweep = if right == up { "0" } else { "1" };
        let flags = format!("0 0,{sweep}");
        let x_sign = if right { 1.0 } else { -1.0 };
        let y_sign = if up { -1.0 } else { 1.0 };
        paths::arc(
            "a",
            &flags,
            radius,
            &paths::point(x_sign * radius, y_sign * radius),
        ) + &paths::line_on_axis("v", y_sign * remaining)
            + &paths::arc(
                "a",
                &flags,
                radius,
                &paths::point(-x_sign * radius, y_sign * radius),
            )
    }
}

impl DynamicShape for Rounded {
    fn width(&self, block_height: f32) -> f32 {
        (block_height / 2.0).min(self.max_width)
    }

    fn height(&self, block_height: f32) -> f32 {
        block_height
    }

    fn connection_offset_y(&self, connection_height: f32) -> f32 {
        connection_height / 2.0
    }

    fn connection_offset_x(&self, connection_width: f32) -> f32 {
        -connection_width
    }

    fn path_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, false)
    }

    fn path_up(&self, block_height: f32) -> String {
        self.main_path(block_height, true, false)
    }

    fn path_right_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, true)
    }
}

/// The squared value shape: fixed-radius corners joined by a straight edge.
#[derive(Debug)]
struct Squared {
    radius: f32,
}

impl Squared {
    fn main_path(&self, height: f32, up: bool, right: bool) -> String {
        let inner_height = height - 2.0 * self.radius;
        let sweep = if right == up { "0" } else { "1" };
        let flags = format!("0 0,{sweep}");
        let x_sign = if right { 1.0 } else { -1.0 };
        let y_sign = if up { -1.0 } else { 1.0 };
        paths::arc(
            "a",
            &flags,
            self.radius,
            &paths::point(x_sign * self.radius, y_sign * self.radius),
        ) + &paths::line_on_axis("v", y_sign * inner_height)
            + &paths::arc(
                "a",
                &flags,
                self.radius,
                &paths::point(-x_sign * self.radius, y_sign * self.radius),
            )
    }
}

impl DynamicShape for Squared {
    fn width(&self, _block_height: f32) -> f32 {
        self.radius
    }

    fn height(&self, block_height: f32) -> f32 {
        block_height
    }

    fn connection_offset_y(&self, connection_height: f32) -> f32 {
        connection_height / 2.0
    }

    fn connection_offset_x(&self, connection_width: f32) -> f32 {
        -connection_width
    }

    fn path_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, false)
    }

    fn path_up(&self, block_height: f32) -> String {
        self.main_path(block_height, true, false)
    }

    fn path_right_down(&self, block_height: f32) -> String {
        self.main_path(block_height, false, true)
    }
}

/// The zelos renderer's layout rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZelosPolicy;

fn has_statement_input(block: &dyn BlockLike) -> bool {
    block
        .inputs()
        .iter()
        .any(|input| input.kind() == InputKind::Statement)
}

fn right_edge_is_square(block: &dyn BlockLike) -> bool {
    block.output_connection().is_some()
        && !has_statement_input(block)
        && block.next_connection().is_none()
}

impl LayoutPolicy for ZelosPolicy {
    // All four corners are rounded unless the edge is taken over by an
    // output shape or a hat.
    fn top_row_left_square(&self, block: &dyn BlockLike, has_hat: bool) -> bool {
        block.output_connection().is_some() || has_hat
    }

    fn top_row_right_square(&self, block: &dyn BlockLike) -> bool {
        right_edge_is_square(block)
    }

    fn bottom_row_left_square(&self, block: &dyn BlockLike) -> bool {
        block.output_connection().is_some()
    }

    fn bottom_row_right_square(&self, block: &dyn BlockLike) -> bool {
        right_edge_is_square(block)
    }

    fn right_edge_uses_output_shape(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use tenon_core::model::simple::{Block, Connection, Field, Input};

    use crate::info::RenderInfo;

    use super::*;

    fn initialized() -> ConstantProvider {
        let mut constants = constants();
        constants.init();
        constants
    }

    #[test]
    fn test_statement_notch_offset_includes_inside_corner() {
        let constants = initialized();
        assert_approx_eq!(f32, constants.statement_input_notch_offset, 12.0 + 4.0);
    }

    #[test]
    fn test_shape_from_output_shape_hint() {
        let constants = initialized();
        let conn = Connection::new(ConnectionKind::OutputValue);

        let hex = constants
            .shape_for_with_hint(&conn, Some(SHAPE_HEXAGONAL))
            .unwrap();
        assert!(hex.is_dynamic());
        assert_approx_eq!(f32, hex.width_for(32.0), 16.0);
        assert_approx_eq!(f32, hex.width_for(200.0), 48.0);

        let square = constants
            .shape_for_with_hint(&conn, Some(SHAPE_SQUARE))
            .unwrap();
        assert_approx_eq!(f32, square.width_for(200.0), 4.0);
    }

    #[test]
    fn test_shape_from_checks() {
        let constants = initialized();

        let boolean = Connection::new(ConnectionKind::InputValue)
            .with_checks(vec!["Boolean".to_string()]);
        let shape = constants.shape_for(&boolean).unwrap();
        // Hexagons are as wide as half their height.
        assert_approx_eq!(f32, shape.width_for(40.0), 20.0);

        let unchecked = Connection::new(ConnectionKind::InputValue);
        let shape = constants.shape_for(&unchecked).unwrap();
        assert!(shape.is_dynamic());
        assert_approx_eq!(f32, shape.width_for(200.0), 48.0);
    }

    #[test]
    fn test_checks_borrowed_from_connected_block() {
        let constants = initialized();
        let child = Block::new().with_output_checks(vec!["Boolean".to_string()]);
        let input = Input::value().with_child(child);
        let conn = input.connection_ref().unwrap();

        let shape = constants.shape_for(conn).unwrap();
        assert_approx_eq!(f32, shape.width_for(64.0), 32.0);
    }

    #[test]
    fn test_statement_connections_get_the_notch() {
        let constants = initialized();
        let conn = Connection::new(ConnectionKind::PreviousStatement);
        let shape = constants.shape_for(&conn).unwrap();
        assert!(!shape.is_dynamic());
        assert_approx_eq!(f32, shape.fixed_width(), 36.0);
        assert_approx_eq!(f32, shape.fixed_height(), 8.0);
    }

    #[test]
    fn test_notch_paths_mirror() {
        let notch = make_notch(36.0, 8.0);
        // The flat inner segment is a third of the notch width.
        assert!(notch.path_left.contains(" h 12 "));
        assert!(notch.path_right.contains(" h -12 "));
        assert!(notch.path_left.starts_with('c'));
        assert_approx_eq!(f32, notch.width, 36.0);
        assert_approx_eq!(f32, notch.height, 8.0);
    }

    #[test]
    fn test_rounded_path_caps_arc_height() {
        let rounded = Rounded {
            max_width: 48.0,
            max_height: 96.0,
        };
        let path = rounded.main_path(120.0, false, false);
        // Arcs stop at the maximum radius and a straight segment covers the
        // remaining 24.
        assert!(path.contains("a 48 48"));
        assert!(path.contains(" v 24 "));

        let short = rounded.main_path(40.0, false, false);
        assert!(short.contains("a 20 20"));
        assert!(short.contains(" v 0 "));
    }

    #[test]
    fn test_dynamic_output_sizes_from_block_height() {
        let constants = initialized();
        let policy = ZelosPolicy;
        let block = Block::new()
            .with_output()
            .with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
        let mut info = RenderInfo::new(&block, &constants, &policy).unwrap();
        info.measure().unwrap();

        // Top 4 + spacer 8 + dummy 32 + spacer 8 + bottom 4.
        assert_approx_eq!(f32, info.height, 56.0);
        let output = info.output_connection.as_ref().unwrap();
        assert_approx_eq!(f32, output.width, (56.0f32 / 2.0).min(48.0));
        assert_approx_eq!(f32, output.height, 56.0);
        assert_approx_eq!(f32, info.start_x, 28.0);
    }
}
