//! Measured parts of a block.
//!
//! The measurement pass turns every visible part of a block (fields, icons,
//! corners, connections, inputs, spacers) into an [`Element`] carrying its
//! size and, later, its position. Elements borrow the model objects they were
//! measured from; nothing is copied out of the block except numbers.
//!
//! Sizing happens in the constructors. Everything after construction only
//! adjusts widths and positions.

use tenon_core::model::{Align, BlockLike, ConnectionLike, FieldLike, IconLike, InputLike};

use crate::constants::ConstantProvider;
use crate::constants::shapes::{ConnectionShape, JaggedTeeth};
use crate::error::RenderError;
use crate::types;

pub mod rows;

/// A measured part of a block.
pub struct Element<'b> {
    pub type_mask: u64,
    pub width: f32,
    pub height: f32,
    /// Left edge relative to the block origin, set by the position pass.
    pub x_pos: f32,
    /// Vertical center relative to the block origin, set by the position
    /// pass.
    pub centerline: f32,
    /// Horizontal offset to this element's notch, where it has one.
    pub notch_offset: f32,
    pub kind: ElementKind<'b>,
}

pub enum ElementKind<'b> {
    Field {
        field: &'b dyn FieldLike,
        is_editable: bool,
        flip_rtl: bool,
    },
    Icon {
        icon: &'b dyn IconLike,
    },
    Hat {
        ascender_height: f32,
    },
    SquareCorner,
    RoundCorner,
    JaggedEdge,
    InRowSpacer,
    Connection(ConnectionInfo<'b>),
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("type_mask", &format_args!("{:#x}", self.type_mask))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("x_pos", &self.x_pos)
            .field("centerline", &self.centerline)
            .finish_non_exhaustive()
    }
}

/// A measured connection and the shape it will be drawn with.
pub struct ConnectionInfo<'b> {
    pub connection: &'b dyn ConnectionLike,
    pub shape: ConnectionShape,
    pub role: ConnectionRole<'b>,
}

pub enum ConnectionRole<'b> {
    Previous,
    Next,
    Output(OutputInfo),
    Input(InputInfo<'b>),
}

/// Extra measurements on an output connection element.
#[derive(Debug)]
pub struct OutputInfo {
    pub connection_offset_x: f32,
    pub connection_offset_y: f32,
    /// How far the block body starts in from the origin to leave room for
    /// the output shape.
    pub start_x: f32,
}

/// Extra measurements on a value or statement input element.
pub struct InputInfo<'b> {
    pub input: &'b dyn InputLike,
    pub align: Align,
    pub connected_block: Option<&'b dyn BlockLike>,
    pub connected_block_width: f32,
    pub connected_block_height: f32,
    pub connection_offset_x: f32,
    pub connection_offset_y: f32,
    pub connection_width: f32,
    pub connection_height: f32,
}

impl<'b> Element<'b> {
    fn new(type_mask: u64, width: f32, height: f32, kind: ElementKind<'b>) -> Self {
        Self {
            type_mask,
            width,
            height,
            x_pos: 0.0,
            centerline: 0.0,
            notch_offset: 0.0,
            kind,
        }
    }

    pub fn is(&self, mask: u64) -> bool {
        self.type_mask & mask != 0
    }

    pub fn is_editable_field(&self) -> bool {
        matches!(self.kind, ElementKind::Field { is_editable: true, .. })
    }

    pub fn connection_info(&self) -> Option<&ConnectionInfo<'b>> {
        match &self.kind {
            ElementKind::Connection(info) => Some(info),
            _ => None,
        }
    }

    pub fn connection_info_mut(&mut self) -> Option<&mut ConnectionInfo<'b>> {
        match &mut self.kind {
            ElementKind::Connection(info) => Some(info),
            _ => None,
        }
    }

    pub fn input_info(&self) -> Option<&InputInfo<'b>> {
        match &self.kind {
            ElementKind::Connection(ConnectionInfo {
                role: ConnectionRole::Input(info),
                ..
            }) => Some(info),
            _ => None,
        }
    }

    pub fn input_info_mut(&mut self) -> Option<&mut InputInfo<'b>> {
        match &mut self.kind {
            ElementKind::Connection(ConnectionInfo {
                role: ConnectionRole::Input(info),
                ..
            }) => Some(info),
            _ => None,
        }
    }

    pub fn output_info(&self) -> Option<&OutputInfo> {
        match &self.kind {
            ElementKind::Connection(ConnectionInfo {
                role: ConnectionRole::Output(info),
                ..
            }) => Some(info),
            _ => None,
        }
    }

    pub fn field(field: &'b dyn FieldLike) -> Self {
        let size = field.size();
        Self::new(
            types::FIELD,
            size.width(),
            size.height(),
            ElementKind::Field {
                field,
                is_editable: field.is_editable(),
                flip_rtl: field.flip_rtl(),
            },
        )
    }

    pub fn icon(icon: &'b dyn IconLike) -> Self {
        let size = icon.size();
        Self::new(
            types::ICON,
            size.width(),
            size.height(),
            ElementKind::Icon { icon },
        )
    }

    pub fn hat(constants: &ConstantProvider) -> Self {
        let height = constants.start_hat_height;
        Self::new(
            types::HAT,
            constants.start_hat_width,
            height,
            ElementKind::Hat {
                ascender_height: height,
            },
        )
    }

    pub fn square_corner(left: bool) -> Self {
        let side = if left {
            types::LEFT_SQUARE_CORNER
        } else {
            types::RIGHT_SQUARE_CORNER
        };
        Self::new(types::CORNER | side, 0.0, 0.0, ElementKind::SquareCorner)
    }

    pub fn round_corner(constants: &ConstantProvider, left: bool) -> Self {
        let side = if left {
            types::LEFT_ROUND_CORNER
        } else {
            types::RIGHT_ROUND_CORNER
        };
        Self::new(
            types::CORNER | side,
            constants.corner_radius,
            constants.corner_radius / 2.0,
            ElementKind::RoundCorner,
        )
    }

    pub fn jagged_edge(teeth: &JaggedTeeth) -> Self {
        Self::new(
            types::JAGGED_EDGE,
            teeth.width,
            teeth.height,
            ElementKind::JaggedEdge,
        )
    }

    pub fn in_row_spacer(constants: &ConstantProvider, width: f32) -> Self {
        Self::new(
            types::SPACER | types::IN_ROW_SPACER,
            width,
            constants.spacer_default_height,
            ElementKind::InRowSpacer,
        )
    }

    pub fn previous_connection(
        constants: &ConstantProvider,
        connection: &'b dyn ConnectionLike,
    ) -> Result<Self, RenderError> {
        let shape = constants.shape_for(connection)?;
        let mut elem = Self::new(
            types::CONNECTION | types::PREVIOUS_CONNECTION,
            shape.fixed_width(),
            shape.fixed_height(),
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape,
                role: ConnectionRole::Previous,
            }),
        );
        elem.notch_offset = constants.notch_offset_left;
        Ok(elem)
    }

    pub fn next_connection(
        constants: &ConstantProvider,
        connection: &'b dyn ConnectionLike,
    ) -> Result<Self, RenderError> {
        let shape = constants.shape_for(connection)?;
        let mut elem = Self::new(
            types::CONNECTION | types::NEXT_CONNECTION,
            shape.fixed_width(),
            shape.fixed_height(),
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape,
                role: ConnectionRole::Next,
            }),
        );
        elem.notch_offset = constants.notch_offset_left;
        Ok(elem)
    }

    pub fn output_connection(
        constants: &ConstantProvider,
        connection: &'b dyn ConnectionLike,
        output_shape_hint: Option<i32>,
    ) -> Result<Self, RenderError> {
        let shape = constants.shape_for_with_hint(connection, output_shape_hint)?;
        // Dynamic output shapes size themselves from the finished block
        // height, so they start at zero and are resized at the end of
        // measurement.
        let (width, height) = if shape.is_dynamic() {
            (0.0, 0.0)
        } else {
            (shape.fixed_width(), shape.fixed_height())
        };
        Ok(Self::new(
            types::CONNECTION | types::OUTPUT_CONNECTION,
            width,
            height,
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape,
                role: ConnectionRole::Output(OutputInfo {
                    connection_offset_x: 0.0,
                    connection_offset_y: constants.tab_offset_from_top,
                    start_x: width,
                }),
            }),
        ))
    }

    pub fn inline_input(
        constants: &ConstantProvider,
        input: &'b dyn InputLike,
        output_shape_hint: Option<i32>,
        dark_path_offset: f32,
    ) -> Result<Self, RenderError> {
        let connection = input.connection().ok_or(RenderError::MissingConnection)?;
        let shape = constants.shape_for_with_hint(connection, output_shape_hint)?;
        let connected_block = input.connected_block();
        let (connected_block_width, connected_block_height) = connected_size(connected_block);

        let (mut width, height) = if connected_block.is_none() {
            (
                constants.empty_inline_input_padding,
                constants.empty_inline_input_height,
            )
        } else {
            (
                connected_block_width + dark_path_offset,
                connected_block_height + dark_path_offset,
            )
        };

        let connection_height = if shape.is_dynamic() {
            shape.height_for(height)
        } else {
            constants.tab_height
        };
        let connection_width = if shape.is_dynamic() {
            shape.width_for(height)
        } else {
            constants.tab_width
        };
        if connected_block.is_none() {
            width += connection_width * if shape.is_dynamic() { 2.0 } else { 1.0 };
        }

        let (connection_offset_x, connection_offset_y) = match &shape {
            ConnectionShape::Dynamic(dynamic) => (
                dynamic.connection_offset_x(connection_width),
                dynamic.connection_offset_y(connection_height),
            ),
            _ => (0.0, constants.tab_offset_from_top),
        };

        Ok(Self::new(
            types::INPUT | types::INLINE_INPUT | types::CONNECTION,
            width,
            height,
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape,
                role: ConnectionRole::Input(InputInfo {
                    input,
                    align: input.align(),
                    connected_block,
                    connected_block_width,
                    connected_block_height,
                    connection_offset_x,
                    connection_offset_y,
                    connection_width,
                    connection_height,
                }),
            }),
        ))
    }

    pub fn external_value_input(
        constants: &ConstantProvider,
        input: &'b dyn InputLike,
    ) -> Result<Self, RenderError> {
        let connection = input.connection().ok_or(RenderError::MissingConnection)?;
        let shape = constants.shape_for(connection)?;
        let connected_block = input.connected_block();
        let (connected_block_width, connected_block_height) = connected_size(connected_block);

        let height = if connected_block.is_none() {
            shape.fixed_height()
        } else {
            connected_block_height
                - constants.tab_offset_from_top
                - constants.tab_vertical_overlap
        };
        let width = shape.fixed_width() + constants.external_value_input_padding;

        Ok(Self::new(
            types::INPUT | types::EXTERNAL_VALUE_INPUT | types::CONNECTION,
            width,
            height,
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape: shape.clone(),
                role: ConnectionRole::Input(InputInfo {
                    input,
                    align: input.align(),
                    connected_block,
                    connected_block_width,
                    connected_block_height,
                    connection_offset_x: 0.0,
                    connection_offset_y: constants.tab_offset_from_top,
                    connection_width: shape.fixed_width(),
                    connection_height: shape.fixed_height(),
                }),
            }),
        ))
    }

    pub fn statement_input(
        constants: &ConstantProvider,
        input: &'b dyn InputLike,
        dark_path_offset: f32,
    ) -> Result<Self, RenderError> {
        let connection = input.connection().ok_or(RenderError::MissingConnection)?;
        let shape = constants.shape_for(connection)?;
        let connected_block = input.connected_block();
        let (connected_block_width, connected_block_height) = connected_size(connected_block);

        let height = if connected_block.is_none() {
            constants.empty_statement_input_height
        } else {
            connected_block_height + constants.statement_bottom_spacer + dark_path_offset
        };
        let width = constants.statement_input_notch_offset + shape.fixed_width();

        let mut elem = Self::new(
            types::INPUT | types::STATEMENT_INPUT | types::CONNECTION,
            width,
            height,
            ElementKind::Connection(ConnectionInfo {
                connection,
                shape: shape.clone(),
                role: ConnectionRole::Input(InputInfo {
                    input,
                    align: input.align(),
                    connected_block,
                    connected_block_width,
                    connected_block_height,
                    connection_offset_x: 0.0,
                    connection_offset_y: 0.0,
                    connection_width: shape.fixed_width(),
                    connection_height: shape.fixed_height(),
                }),
            }),
        );
        elem.notch_offset = constants.statement_input_notch_offset;
        Ok(elem)
    }
}

fn connected_size(block: Option<&dyn BlockLike>) -> (f32, f32) {
    match block {
        Some(block) => {
            let size = block.height_width();
            (size.width(), size.height())
        }
        None => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use tenon_core::model::ConnectionKind;
    use tenon_core::model::simple::{Block, Field, Input};

    use super::*;

    fn constants() -> ConstantProvider {
        let mut constants = ConstantProvider::new();
        constants.init();
        constants
    }

    #[test]
    fn test_field_element_takes_reported_size() {
        let field = Field::editable(40.0, 20.0);
        let elem = Element::field(&field);
        assert!(elem.is(types::FIELD));
        assert!(elem.is_editable_field());
        assert_approx_eq!(f32, elem.width, 40.0);
        assert_approx_eq!(f32, elem.height, 20.0);
    }

    #[test]
    fn test_corners() {
        let constants = constants();
        let square = Element::square_corner(true);
        assert!(square.is(types::LEFT_SQUARE_CORNER));
        assert_approx_eq!(f32, square.width, 0.0);

        let round = Element::round_corner(&constants, false);
        assert!(round.is(types::RIGHT_ROUND_CORNER));
        assert_approx_eq!(f32, round.width, 8.0);
        assert_approx_eq!(f32, round.height, 4.0);
    }

    #[test]
    fn test_empty_inline_input() {
        let constants = constants();
        let input = Input::value();
        let elem = Element::inline_input(&constants, &input, None, 0.0).unwrap();
        // Padding plus one tab width.
        assert_approx_eq!(f32, elem.width, 14.5 + 8.0);
        assert_approx_eq!(f32, elem.height, 26.0);
        let info = elem.input_info().unwrap();
        assert_approx_eq!(f32, info.connection_offset_y, 5.0);
        assert_approx_eq!(f32, info.connection_width, 8.0);
    }

    #[test]
    fn test_connected_inline_input_matches_child() {
        let constants = constants();
        let child = Block::new().with_output().with_reported_size(50.0, 30.0);
        let input = Input::value().with_child(child);
        let elem = Element::inline_input(&constants, &input, None, 0.0).unwrap();
        assert_approx_eq!(f32, elem.width, 50.0);
        assert_approx_eq!(f32, elem.height, 30.0);
    }

    #[test]
    fn test_empty_external_value_input() {
        let constants = constants();
        let input = Input::value();
        let elem = Element::external_value_input(&constants, &input).unwrap();
        assert_approx_eq!(f32, elem.width, 10.0);
        assert_approx_eq!(f32, elem.height, 15.0);
    }

    #[test]
    fn test_connected_external_input_overlaps_tab() {
        let constants = constants();
        let child = Block::new().with_output().with_reported_size(40.0, 32.0);
        let input = Input::value().with_child(child);
        let elem = Element::external_value_input(&constants, &input).unwrap();
        // Child height minus the tab offset and the vertical overlap.
        assert_approx_eq!(f32, elem.height, 32.0 - 5.0 - 2.5);
    }

    #[test]
    fn test_statement_input_sizing() {
        let constants = constants();
        let empty = Input::statement();
        let elem = Element::statement_input(&constants, &empty, 0.0).unwrap();
        assert_approx_eq!(f32, elem.width, 15.0 + 15.0);
        assert_approx_eq!(f32, elem.height, 24.0);
        assert_approx_eq!(f32, elem.notch_offset, 15.0);

        let child = Block::new().with_previous().with_reported_size(60.0, 48.0);
        let full = Input::statement().with_child(child);
        let elem = Element::statement_input(&constants, &full, 1.0).unwrap();
        assert_approx_eq!(f32, elem.height, 48.0 + 0.0 + 1.0);
    }

    #[test]
    fn test_output_connection_element() {
        let constants = constants();
        let block = Block::new().with_output();
        let conn = block.output_ref().unwrap();
        let elem = Element::output_connection(&constants, conn, None).unwrap();
        assert!(elem.is(types::OUTPUT_CONNECTION));
        assert_approx_eq!(f32, elem.width, 8.0);
        let info = elem.output_info().unwrap();
        assert_approx_eq!(f32, info.start_x, 8.0);
        assert_approx_eq!(f32, info.connection_offset_y, 5.0);
    }

    #[test]
    fn test_missing_connection_is_an_error() {
        let constants = constants();
        let input = Input::dummy();
        assert!(matches!(
            Element::inline_input(&constants, &input, None, 0.0),
            Err(RenderError::MissingConnection)
        ));
    }

    #[test]
    fn test_connection_kind_flows_through() {
        let constants = constants();
        let block = Block::new().with_previous();
        let conn = block.previous_ref().unwrap();
        assert_eq!(conn.kind(), ConnectionKind::PreviousStatement);
        let elem = Element::previous_connection(&constants, conn).unwrap();
        assert_approx_eq!(f32, elem.width, 15.0);
        assert_approx_eq!(f32, elem.height, 4.0);
        assert_approx_eq!(f32, elem.notch_offset, 15.0);
    }
}
