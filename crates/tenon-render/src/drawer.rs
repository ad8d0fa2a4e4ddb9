//! The drawing pass.
//!
//! A [`Drawer`] walks measured rows clockwise from the top-left corner and
//! assembles the block's outline path, the inline-input cutouts and the
//! highlight fragments. Along the way it writes every connection offset and
//! field position back to the block, then commits the finished paths with
//! [`BlockLike::set_paths`] and the size with [`BlockLike::set_rendered_size`].
//!
//! The outline is drawn in one pass: top row left to right, right edge
//! downward, bottom row right to left, left edge upward, closed with `z`.

use log::trace;

use tenon_core::model::{
    BlockPaths, ConnectionHighlight, ConnectionKind, ConnectionLike,
};

use crate::constants::ConstantProvider;
use crate::constants::shapes::ConnectionShape;
use crate::error::RenderError;
use crate::info::RenderInfo;
use crate::measurables::ElementKind;
use crate::paths;
use crate::types;

/// Draws one measured block.
pub struct Drawer<'b> {
    info: RenderInfo<'b>,
    outline: String,
    inline: String,
    highlights: Vec<ConnectionHighlight>,
}

impl<'b> Drawer<'b> {
    /// Wraps a measured [`RenderInfo`]. Fails if measurement has not run.
    pub fn new(info: RenderInfo<'b>) -> Result<Self, RenderError> {
        if !info.is_measured() {
            return Err(RenderError::NotMeasured);
        }
        Ok(Self {
            info,
            outline: String::new(),
            inline: String::new(),
            highlights: Vec::new(),
        })
    }

    /// Draws the block, commits paths, positions and size to it, and returns
    /// the committed paths.
    pub fn draw(mut self) -> Result<BlockPaths, RenderError> {
        self.draw_outline()?;
        self.draw_internals();
        trace!(
            outline_len = self.outline.len(),
            inline_len = self.inline.len(),
            highlights = self.highlights.len();
            "block drawn"
        );

        let Self {
            info,
            outline,
            inline,
            highlights,
        } = self;
        let block_paths = BlockPaths {
            outline,
            inline,
            flipped_rtl: info.rtl,
            highlights,
        };
        info.block.set_paths(block_paths.clone());
        info.block
            .set_rendered_size(info.height, info.width_with_children, info.width);
        Ok(block_paths)
    }

    fn draw_outline(&mut self) -> Result<(), RenderError> {
        self.draw_top()?;
        for index in 1..self.info.rows.len().saturating_sub(1) {
            if self.info.rows[index].has_jagged_edge {
                self.draw_jagged_edge(index)?;
            } else if self.info.rows[index].has_statement {
                self.draw_statement_input(index)?;
            } else if self.info.rows[index].has_external_input {
                self.draw_value_input(index)?;
            } else {
                self.draw_right_side_row(index);
            }
        }
        self.draw_bottom()?;
        self.draw_left();
        Ok(())
    }

    fn draw_top(&mut self) -> Result<(), RenderError> {
        let shapes = self.info.constants.shapes()?;
        let row = &self.info.rows[0];
        let rtl = self.info.rtl;

        let mut fragment = paths::move_by(row.x_pos, self.info.start_y);
        for elem in &row.elements {
            if types::is_left_rounded_corner(elem.type_mask) {
                fragment += &shapes.outside_corners.top_left;
            } else if types::is_right_rounded_corner(elem.type_mask) {
                fragment += &shapes.outside_corners.top_right;
            } else if elem.is(types::PREVIOUS_CONNECTION) {
                if let Some(conn) = elem.connection_info() {
                    let x = row.x_pos + elem.notch_offset;
                    conn.connection
                        .set_offset_in_block(if rtl { -x } else { x }, 0.0);
                    fragment += &conn.shape.path_down(elem.height);
                    if let Some(highlight) = connection_highlight(
                        self.info.constants,
                        conn.connection,
                        &conn.shape,
                        elem.height,
                    ) {
                        self.highlights.push(highlight);
                    }
                }
            } else if elem.is(types::HAT) {
                fragment += &shapes.start_hat.path;
            } else if elem.is(types::SPACER) {
                fragment += &paths::line_on_axis("h", elem.width);
            }
        }
        fragment += &paths::line_on_axis("v", row.height);
        self.outline.push_str(&fragment);
        Ok(())
    }

    fn draw_jagged_edge(&mut self, index: usize) -> Result<(), RenderError> {
        let teeth = &self.info.constants.shapes()?.jagged_teeth;
        let row = &self.info.rows[index];
        let fragment =
            teeth.path.clone() + &paths::line_on_axis("v", row.height - teeth.height);
        self.outline.push_str(&fragment);
        Ok(())
    }

    fn draw_value_input(&mut self, index: usize) -> Result<(), RenderError> {
        let row = &self.info.rows[index];
        let rtl = self.info.rtl;
        let elem = row.last_input().ok_or(RenderError::MissingConnection)?;
        let conn = elem
            .connection_info()
            .ok_or(RenderError::MissingConnection)?;
        let input = elem.input_info().ok_or(RenderError::MissingConnection)?;

        let x = row.x_pos + row.width;
        conn.connection
            .set_offset_in_block(if rtl { -x } else { x }, row.y_pos);
        if let Some(highlight) = connection_highlight(
            self.info.constants,
            conn.connection,
            &conn.shape,
            input.connection_height,
        ) {
            self.highlights.push(highlight);
        }

        let fragment = paths::line_on_axis("H", elem.x_pos + elem.width)
            + &conn.shape.path_down(elem.height)
            + &paths::line_on_axis("v", row.height - input.connection_height);
        self.outline.push_str(&fragment);
        Ok(())
    }

    fn draw_statement_input(&mut self, index: usize) -> Result<(), RenderError> {
        let inner = &self.info.constants.shapes()?.inside_corners;
        let row = &self.info.rows[index];
        let rtl = self.info.rtl;
        let elem = row
            .last_input()
            .ok_or(RenderError::MissingStatementInput)?;
        let conn = elem
            .connection_info()
            .ok_or(RenderError::MissingConnection)?;

        let conn_x = row.x_pos + row.statement_edge + elem.notch_offset;
        conn.connection
            .set_offset_in_block(if rtl { -conn_x } else { conn_x }, row.y_pos);
        if let Some(highlight) = connection_highlight(
            self.info.constants,
            conn.connection,
            &conn.shape,
            elem.height,
        ) {
            self.highlights.push(highlight);
        }

        // The notch is drawn right to left, so its right edge sits at the
        // notch offset plus the notch width.
        let x = elem.x_pos + elem.notch_offset + conn.shape.fixed_width();
        let inner_height = row.height - 2.0 * inner.height;
        let fragment = paths::line_on_axis("H", x)
            + &conn.shape.path_up(elem.height)
            + &paths::line_on_axis("h", -(elem.notch_offset - inner.width))
            + &inner.path_top
            + &paths::line_on_axis("v", inner_height)
            + &inner.path_bottom
            + &paths::line_on_axis("H", row.x_pos + row.width);
        self.outline.push_str(&fragment);
        Ok(())
    }

    fn draw_right_side_row(&mut self, index: usize) {
        let row = &self.info.rows[index];
        if row.is(types::INPUT_ROW) && self.uses_dynamic_right_edge() {
            if let Some(ConnectionShape::Dynamic(shape)) = self
                .info
                .output_connection
                .as_ref()
                .and_then(|output| output.connection_info())
                .map(|conn| &conn.shape)
            {
                let fragment = shape.path_right_down(row.height);
                self.outline.push_str(&fragment);
                return;
            }
        }
        self.outline
            .push_str(&paths::line_on_axis("V", row.y_pos + row.height));
    }

    /// Whether the right edge is drawn with the output shape instead of a
    /// straight line: a dynamic output, a single input row and nothing that
    /// would break the curve.
    fn uses_dynamic_right_edge(&self) -> bool {
        self.info.policy.right_edge_uses_output_shape()
            && self
                .info
                .output_connection
                .as_ref()
                .and_then(|output| output.connection_info())
                .is_some_and(|conn| conn.shape.is_dynamic())
            && !self
                .info
                .rows
                .iter()
                .any(|row| row.has_statement || row.has_external_input)
            && self
                .info
                .rows
                .iter()
                .filter(|row| row.is(types::INPUT_ROW))
                .count()
                == 1
            && !self.info.bottom_row().has_next_connection
    }

    fn draw_bottom(&mut self) -> Result<(), RenderError> {
        let shapes = self.info.constants.shapes()?;
        let row_index = self.info.rows.len() - 1;
        let row = &self.info.rows[row_index];
        let rtl = self.info.rtl;

        // The bottom row is drawn right to left, so fragments collect in
        // element order reversed and the vertical approach is prepended.
        let mut tail = String::new();
        let mut right_corner_y_offset = 0.0;
        for elem in row.elements.iter().rev() {
            if elem.is(types::NEXT_CONNECTION) {
                if let Some(conn) = elem.connection_info() {
                    let x = elem.x_pos;
                    conn.connection
                        .set_offset_in_block(if rtl { -x } else { x }, row.baseline);
                    tail += &conn.shape.path_up(elem.height);
                    if let Some(highlight) = connection_highlight(
                        self.info.constants,
                        conn.connection,
                        &conn.shape,
                        elem.height,
                    ) {
                        self.highlights.push(highlight);
                    }
                }
            } else if types::is_left_square_corner(elem.type_mask) {
                tail += &paths::line_on_axis("H", row.x_pos);
            } else if types::is_left_rounded_corner(elem.type_mask) {
                tail += &shapes.outside_corners.bottom_left;
            } else if types::is_right_rounded_corner(elem.type_mask) {
                tail += &shapes.outside_corners.bottom_right;
                right_corner_y_offset = shapes.outside_corners.right_height;
            } else if elem.is(types::SPACER) {
                tail += &paths::line_on_axis("h", -elem.width);
            }
        }

        let fragment =
            paths::line_on_axis("V", row.baseline - right_corner_y_offset) + &tail;
        self.outline.push_str(&fragment);
        Ok(())
    }

    fn draw_left(&mut self) {
        let rtl = self.info.rtl;
        if let Some(output) = &self.info.output_connection {
            if let (Some(conn), Some(out)) = (output.connection_info(), output.output_info()) {
                let x = self.info.start_x + out.connection_offset_x;
                conn.connection
                    .set_offset_in_block(if rtl { -x } else { x }, out.connection_offset_y);
                if let Some(highlight) = connection_highlight(
                    self.info.constants,
                    conn.connection,
                    &conn.shape,
                    output.height,
                ) {
                    self.highlights.push(highlight);
                }

                let fragment = match &conn.shape {
                    // A dynamic output spans the whole left edge.
                    ConnectionShape::Dynamic(shape) => {
                        paths::line_on_axis("V", output.height) + &shape.path_up(output.height)
                    }
                    _ => {
                        let tab_bottom = out.connection_offset_y + output.height;
                        paths::line_on_axis("V", tab_bottom)
                            + &conn.shape.path_up(output.height)
                    }
                };
                self.outline.push_str(&fragment);
            }
        }
        self.outline.push_str("z");
    }

    fn draw_internals(&mut self) {
        let rtl = self.info.rtl;
        let hide = self.info.is_insertion_marker;
        for row in &self.info.rows {
            for elem in &row.elements {
                match &elem.kind {
                    ElementKind::Field { field, flip_rtl, .. } => {
                        let y = elem.centerline - elem.height / 2.0;
                        let mut x = elem.x_pos;
                        if rtl {
                            x = -(x + elem.width);
                            if *flip_rtl {
                                x += elem.width;
                            }
                        }
                        field.set_position(x, y);
                        if hide {
                            field.set_visible(false);
                        }
                    }
                    ElementKind::Icon { icon } => {
                        let y = elem.centerline - elem.height / 2.0;
                        let mut x = elem.x_pos;
                        if rtl {
                            x = -(x + elem.width);
                        }
                        icon.set_position(x, y);
                        if hide {
                            icon.set_visible(false);
                        }
                    }
                    ElementKind::Connection(conn) if elem.is(types::INLINE_INPUT) => {
                        let Some(input) = elem.input_info() else {
                            continue;
                        };
                        let y_pos = elem.centerline - elem.height / 2.0;
                        let connection_right = elem.x_pos + input.connection_width;

                        let fragment = match &conn.shape {
                            // Dynamic cutouts use the shape for both side
                            // walls.
                            ConnectionShape::Dynamic(shape) => {
                                let flat_width = elem.width - input.connection_width * 2.0;
                                paths::move_to(connection_right, y_pos)
                                    + &paths::line_on_axis("h", flat_width)
                                    + &shape.path_right_down(elem.height)
                                    + &paths::line_on_axis("h", -flat_width)
                                    + &shape.path_up(elem.height)
                                    + "z"
                            }
                            _ => {
                                let connection_top = input.connection_offset_y;
                                let connection_bottom =
                                    input.connection_height + connection_top;
                                paths::move_to(connection_right, y_pos)
                                    + &paths::line_on_axis("v", connection_top)
                                    + &conn.shape.path_down(input.connection_height)
                                    + &paths::line_on_axis(
                                        "v",
                                        elem.height - connection_bottom,
                                    )
                                    + &paths::line_on_axis(
                                        "h",
                                        elem.width - input.connection_width,
                                    )
                                    + &paths::line_on_axis("v", -elem.height)
                                    + "z"
                            }
                        };
                        self.inline.push_str(&fragment);

                        let x =
                            elem.x_pos + input.connection_width + input.connection_offset_x;
                        conn.connection.set_offset_in_block(
                            if rtl { -x } else { x },
                            y_pos + input.connection_offset_y,
                        );
                        if let Some(highlight) = connection_highlight(
                            self.info.constants,
                            conn.connection,
                            &conn.shape,
                            input.connection_height,
                        ) {
                            self.highlights.push(highlight);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

/// The highlight fragment for a highlighted connection, drawn relative to
/// the connection's recorded offset.
fn connection_highlight(
    constants: &ConstantProvider,
    connection: &dyn ConnectionLike,
    shape: &ConnectionShape,
    attach_height: f32,
) -> Option<ConnectionHighlight> {
    if !connection.is_highlighted() {
        return None;
    }
    let kind = connection.kind();
    let path = match kind {
        ConnectionKind::InputValue | ConnectionKind::OutputValue => {
            let len = constants.tab_offset_from_top;
            paths::move_by(0.0, -len)
                + &paths::line_on_axis("v", len)
                + &shape.path_down(attach_height)
                + &paths::line_on_axis("v", len)
        }
        ConnectionKind::PreviousStatement | ConnectionKind::NextStatement => {
            let x_len = constants.notch_offset_left - constants.corner_radius;
            paths::move_by(-x_len, 0.0)
                + &paths::line_on_axis("h", x_len)
                + &shape.path_down(attach_height)
                + &paths::line_on_axis("h", x_len)
        }
    };
    Some(ConnectionHighlight { kind, path })
}
