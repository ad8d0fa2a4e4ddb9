//! Block measurement.
//!
//! [`RenderInfo`] turns a block into rows of measured elements through six
//! passes, in order:
//!
//! 1. create rows from the block's inputs, fields and icons
//! 2. insert in-row spacers between elements
//! 3. measure rows and compute block-wide bounds
//! 4. align row contents to the block width
//! 5. insert spacer rows between content rows
//! 6. finalize positions, centerlines and totals
//!
//! Renderer-specific rules hook in through [`LayoutPolicy`]. The default
//! method bodies are the base renderer; `geras` and `zelos` override the
//! methods where their layout differs.

use log::trace;

use tenon_core::model::{Align, BlockLike, HatStyle, InputKind, InputLike};

use crate::constants::ConstantProvider;
use crate::error::RenderError;
use crate::measurables::rows::Row;
use crate::measurables::{ConnectionRole, Element};
use crate::types;

/// Renderer-specific layout rules. Defaults implement the base renderer.
pub trait LayoutPolicy {
    /// Extra size blocks reserve for a drop-shadow edge.
    fn dark_path_offset(&self) -> f32 {
        0.0
    }

    /// Minimum height of a row holding only dummy or end-row inputs.
    fn dummy_input_min_height(&self, constants: &ConstantProvider, is_shadow: bool) -> f32 {
        if is_shadow {
            constants.dummy_input_shadow_min_height
        } else {
            constants.dummy_input_min_height
        }
    }

    /// Whether a row adopts the alignment of its first input.
    fn adopts_input_alignment(&self, _is_inline: bool) -> bool {
        true
    }

    fn bottom_row_min_height(&self, constants: &ConstantProvider, follows_statement: bool) -> f32 {
        if follows_statement {
            constants.bottom_row_after_statement_min_height
        } else {
            constants.bottom_row_min_height
        }
    }

    fn top_row_left_square(&self, block: &dyn BlockLike, has_hat: bool) -> bool {
        block.output_connection().is_some() || has_hat || block.follows_stack()
    }

    fn top_row_right_square(&self, _block: &dyn BlockLike) -> bool {
        true
    }

    fn bottom_row_left_square(&self, block: &dyn BlockLike) -> bool {
        block.output_connection().is_some()
            || block.next_connection().is_some_and(|c| c.is_connected())
    }

    fn bottom_row_right_square(&self, _block: &dyn BlockLike) -> bool {
        true
    }

    /// Width of the in-row spacer between `prev` and `next`. `None` stands
    /// for the row boundary.
    fn in_row_spacing(
        &self,
        constants: &ConstantProvider,
        prev: Option<&Element>,
        next: Option<&Element>,
        _rtl: bool,
    ) -> f32 {
        if prev.is_none() {
            if let Some(next) = next {
                if next.is(types::STATEMENT_INPUT) {
                    return constants.statement_input_padding_left;
                }
            }
        }
        if let (Some(prev), None) = (prev, next) {
            if prev.is(types::INPUT) {
                if prev.is(types::EXTERNAL_VALUE_INPUT) {
                    return constants.no_padding;
                }
                if prev.is(types::INLINE_INPUT) {
                    return constants.large_padding;
                }
                if prev.is(types::STATEMENT_INPUT) {
                    return constants.no_padding;
                }
            }
        }
        if let (Some(prev), Some(next)) = (prev, next) {
            if types::is_previous_or_next_connection(next.type_mask) {
                if types::is_left_square_corner(prev.type_mask) {
                    return next.notch_offset;
                }
                if types::is_left_rounded_corner(prev.type_mask) {
                    return next.notch_offset - constants.corner_radius;
                }
            }
        }
        constants.medium_padding
    }

    /// Extra width appended to a row's trailing spacer.
    fn trailing_spacer_extra(
        &self,
        _constants: &ConstantProvider,
        _row: &Row,
        _block_has_external_inputs: bool,
    ) -> f32 {
        0.0
    }

    /// Height of the spacer row between `prev` and `next`.
    fn spacer_row_height(&self, constants: &ConstantProvider, _prev: &Row, _next: &Row) -> f32 {
        constants.medium_padding
    }

    /// Vertical centerline of `elem` within `row`, in block coordinates.
    fn elem_centerline(&self, _constants: &ConstantProvider, row: &Row, elem: &Element) -> f32 {
        base_elem_centerline(row, elem)
    }

    /// Whether inline rows align to their vertical neighbors rather than to
    /// the full block width.
    fn aligns_inline_rows(&self) -> bool {
        false
    }

    /// Whether inline statement rows stop at a capped bottom width instead
    /// of the full block width.
    fn caps_inline_statement_width(&self) -> bool {
        false
    }

    /// Whether single-row output blocks draw their right edge with the
    /// output shape.
    fn right_edge_uses_output_shape(&self) -> bool {
        false
    }
}

/// The base centerline rules, shared by the trait default and by policies
/// that only override the input-row cases.
pub(crate) fn base_elem_centerline(row: &Row, elem: &Element) -> f32 {
    if elem.is(types::SPACER) {
        return row.y_pos + elem.height / 2.0;
    }
    if row.is(types::BOTTOM_ROW) {
        let baseline = row.y_pos + row.height - row.descender_height;
        if elem.is(types::NEXT_CONNECTION) {
            return baseline + elem.height / 2.0;
        }
        return baseline - elem.height / 2.0;
    }
    if row.is(types::TOP_ROW) {
        if elem.is(types::HAT) {
            return row.capline - elem.height / 2.0;
        }
        return row.capline + elem.height / 2.0;
    }
    row.y_pos + row.height / 2.0
}

/// The base renderer's layout rules, i.e. every trait default.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasePolicy;

impl LayoutPolicy for BasePolicy {}

/// All measurements for one render of one block.
pub struct RenderInfo<'b> {
    pub block: &'b dyn BlockLike,
    pub constants: &'b ConstantProvider,
    pub policy: &'b dyn LayoutPolicy,

    /// Top row, input and spacer rows, bottom row, in draw order.
    pub rows: Vec<Row<'b>>,
    /// The output connection element, kept out of the rows.
    pub output_connection: Option<Element<'b>>,

    pub is_inline: bool,
    pub is_collapsed: bool,
    pub is_insertion_marker: bool,
    pub rtl: bool,

    pub height: f32,
    pub width: f32,
    pub width_with_children: f32,
    pub statement_edge: f32,
    /// Where the block body starts, to the right of any output shape.
    pub start_x: f32,
    /// Where the block body starts, below any hat.
    pub start_y: f32,

    measured: bool,
}

impl<'b> RenderInfo<'b> {
    pub fn new(
        block: &'b dyn BlockLike,
        constants: &'b ConstantProvider,
        policy: &'b dyn LayoutPolicy,
    ) -> Result<Self, RenderError> {
        let output_connection = match block.output_connection() {
            Some(conn) => Some(Element::output_connection(
                constants,
                conn,
                block.output_shape(),
            )?),
            None => None,
        };
        Ok(Self {
            block,
            constants,
            policy,
            rows: Vec::new(),
            output_connection,
            is_inline: block.inputs_inline() && !block.is_collapsed(),
            is_collapsed: block.is_collapsed(),
            is_insertion_marker: block.is_insertion_marker(),
            rtl: block.rtl(),
            height: 0.0,
            width: 0.0,
            width_with_children: 0.0,
            statement_edge: 0.0,
            start_x: 0.0,
            start_y: 0.0,
            measured: false,
        })
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn top_row(&self) -> &Row<'b> {
        &self.rows[0]
    }

    pub fn bottom_row(&self) -> &Row<'b> {
        &self.rows[self.rows.len() - 1]
    }

    /// Runs all measurement passes.
    pub fn measure(&mut self) -> Result<(), RenderError> {
        self.create_rows()?;
        self.add_elem_spacing();
        self.compute_bounds();
        self.align_row_elements()?;
        self.add_row_spacing();
        self.finalize();
        self.measured = true;
        trace!(
            rows_count = self.rows.len(),
            width = self.width,
            height = self.height;
            "block measured"
        );
        Ok(())
    }

    fn create_rows(&mut self) -> Result<(), RenderError> {
        let mut rows = Vec::new();
        rows.push(self.make_top_row()?);
        let mut active = Row::input();

        for icon in self.block.icons() {
            if !self.is_collapsed || !icon.collapse_hidden() {
                active.elements.push(Element::icon(icon));
            }
        }

        if !self.is_collapsed {
            let mut last_input: Option<&'b dyn InputLike> = None;
            for input in self.block.inputs() {
                if self.should_start_new_row(input, last_input) {
                    rows.push(active);
                    active = Row::input();
                }
                for field in input.fields() {
                    active.elements.push(Element::field(field));
                }
                self.add_input(input, &mut active)?;
                last_input = Some(input);
            }
        } else {
            active.has_jagged_edge = true;
            active
                .elements
                .push(Element::jagged_edge(&self.constants.shapes()?.jagged_teeth));
        }

        if !active.elements.is_empty() || active.has_dummy_input {
            rows.push(active);
        }
        rows.push(self.make_bottom_row()?);
        self.rows = rows;
        Ok(())
    }

    fn make_top_row(&self) -> Result<Row<'b>, RenderError> {
        let block = self.block;
        let has_previous = block.previous_connection().is_some();
        let wants_hat = match block.hat() {
            Some(HatStyle::Cap) => true,
            Some(HatStyle::Flat) => false,
            None => self.constants.add_start_hats,
        };
        let has_hat = wants_hat && self.output_connection.is_none() && !has_previous;

        let mut row = Row::top();
        row.elements
            .push(if self.policy.top_row_left_square(block, has_hat) {
                Element::square_corner(true)
            } else {
                Element::round_corner(self.constants, true)
            });

        if has_hat {
            row.elements.push(Element::hat(self.constants));
        } else if let Some(prev) = block.previous_connection() {
            row.has_previous_connection = true;
            row.elements
                .push(Element::previous_connection(self.constants, prev)?);
        }

        let precedes_statement = !self.is_collapsed
            && block
                .inputs()
                .first()
                .is_some_and(|input| input.kind() == InputKind::Statement);
        row.min_height = if precedes_statement {
            self.constants.top_row_precedes_statement_min_height
        } else {
            self.constants.top_row_min_height
        };

        row.elements.push(if self.policy.top_row_right_square(block) {
            Element::square_corner(false)
        } else {
            Element::round_corner(self.constants, false)
        });
        Ok(row)
    }

    fn make_bottom_row(&self) -> Result<Row<'b>, RenderError> {
        let block = self.block;
        let mut row = Row::bottom();
        row.has_next_connection = block.next_connection().is_some();
        let follows_statement = block
            .inputs()
            .last()
            .is_some_and(|input| input.kind() == InputKind::Statement);
        row.follows_statement = follows_statement;
        row.min_height = self
            .policy
            .bottom_row_min_height(self.constants, follows_statement);

        row.elements
            .push(if self.policy.bottom_row_left_square(block) {
                Element::square_corner(true)
            } else {
                Element::round_corner(self.constants, true)
            });
        if let Some(next) = block.next_connection() {
            row.elements
                .push(Element::next_connection(self.constants, next)?);
        }
        row.elements
            .push(if self.policy.bottom_row_right_square(block) {
                Element::square_corner(false)
            } else {
                Element::round_corner(self.constants, false)
            });
        Ok(row)
    }

    fn should_start_new_row(
        &self,
        input: &dyn InputLike,
        last_input: Option<&dyn InputLike>,
    ) -> bool {
        let Some(last_input) = last_input else {
            return false;
        };
        // Statement inputs always get a row to themselves, and end-row
        // inputs end theirs.
        if input.kind() == InputKind::Statement || last_input.kind() == InputKind::Statement {
            return true;
        }
        if last_input.kind() == InputKind::EndRow {
            return true;
        }
        matches!(
            input.kind(),
            InputKind::Value | InputKind::Dummy | InputKind::EndRow
        ) && !self.is_inline
    }

    fn add_input(
        &self,
        input: &'b dyn InputLike,
        active_row: &mut Row<'b>,
    ) -> Result<(), RenderError> {
        let dark_path_offset = self.policy.dark_path_offset();
        match input.kind() {
            InputKind::Value if self.is_inline => {
                active_row.elements.push(Element::inline_input(
                    self.constants,
                    input,
                    self.block.output_shape(),
                    dark_path_offset,
                )?);
                active_row.has_inline_input = true;
            }
            InputKind::Value => {
                active_row
                    .elements
                    .push(Element::external_value_input(self.constants, input)?);
                active_row.has_external_input = true;
            }
            InputKind::Statement => {
                active_row.elements.push(Element::statement_input(
                    self.constants,
                    input,
                    dark_path_offset,
                )?);
                active_row.has_statement = true;
            }
            InputKind::Dummy | InputKind::EndRow => {
                active_row.min_height = active_row.min_height.max(
                    self.policy
                        .dummy_input_min_height(self.constants, self.block.is_shadow()),
                );
                active_row.has_dummy_input = true;
            }
        }
        if self.policy.adopts_input_alignment(self.is_inline) && active_row.align.is_none() {
            active_row.align = Some(input.align());
        }
        Ok(())
    }

    fn add_elem_spacing(&mut self) {
        let block_has_external_inputs = self.rows.iter().any(|row| row.has_external_input);
        for row in self.rows.iter_mut() {
            let old = std::mem::take(&mut row.elements);

            if row.starts_with_elem_spacer() {
                let width =
                    self.policy
                        .in_row_spacing(self.constants, None, old.first(), self.rtl);
                row.elements
                    .push(Element::in_row_spacer(self.constants, width));
            }
            if old.is_empty() {
                continue;
            }

            let between: Vec<f32> = old
                .windows(2)
                .map(|pair| {
                    self.policy
                        .in_row_spacing(self.constants, Some(&pair[0]), Some(&pair[1]), self.rtl)
                })
                .collect();
            let trailing = if row.ends_with_elem_spacer() {
                let mut width =
                    self.policy
                        .in_row_spacing(self.constants, old.last(), None, self.rtl);
                width += self.policy.trailing_spacer_extra(
                    self.constants,
                    row,
                    block_has_external_inputs,
                );
                Some(width)
            } else {
                None
            };

            for (i, elem) in old.into_iter().enumerate() {
                row.elements.push(elem);
                if let Some(&width) = between.get(i) {
                    row.elements
                        .push(Element::in_row_spacer(self.constants, width));
                }
            }
            if let Some(width) = trailing {
                row.elements
                    .push(Element::in_row_spacer(self.constants, width));
            }
        }
    }

    fn compute_bounds(&mut self) {
        let mut widest_statement_row_fields: f32 = 0.0;
        let mut block_width: f32 = 0.0;
        let mut widest_with_connected: f32 = 0.0;
        for row in self.rows.iter_mut() {
            row.measure();
            block_width = block_width.max(row.width);
            if row.has_statement {
                if let Some(input) = row.last_input() {
                    let inner_width = row.width - input.width;
                    widest_statement_row_fields = widest_statement_row_fields.max(inner_width);
                }
            }
            widest_with_connected = widest_with_connected.max(row.width_with_connected_blocks);
        }
        self.statement_edge = widest_statement_row_fields;
        self.width = block_width;

        for row in self.rows.iter_mut() {
            if row.has_statement {
                row.statement_edge = widest_statement_row_fields;
            }
        }

        self.width_with_children = block_width.max(widest_with_connected);
        if let Some(output) = &self.output_connection {
            self.start_x = output.width;
            self.width += output.width;
            self.width_with_children += output.width;
        }
    }

    fn desired_row_width(&self, index: usize) -> f32 {
        if self.policy.caps_inline_statement_width()
            && self.is_inline
            && self.rows[index].has_statement
        {
            self.statement_edge + self.constants.max_bottom_width + self.start_x
        } else {
            self.width - self.start_x
        }
    }

    fn align_row_elements(&mut self) -> Result<(), RenderError> {
        if self.policy.aligns_inline_rows() && self.is_inline {
            return self.align_inline_rows();
        }
        for index in 0..self.rows.len() {
            if self.rows[index].has_statement {
                self.align_statement_row(index)?;
            } else {
                let missing = self.desired_row_width(index) - self.rows[index].width;
                if missing > 0.0 {
                    self.add_alignment_padding(index, missing);
                }
                if types::is_top_or_bottom_row(self.rows[index].type_mask) {
                    self.rows[index].width_with_connected_blocks = self.rows[index].width;
                }
            }
        }
        Ok(())
    }

    /// Inline rows align to the wider of their vertical neighbors, so runs
    /// of short rows between statements stay ragged instead of stretching to
    /// the widest row on the block.
    fn align_inline_rows(&mut self) -> Result<(), RenderError> {
        let row_count = self.rows.len();
        let mut next_right_edges = vec![0.0f32; row_count];
        let mut next_right_edge: f32 = 0.0;
        let mut prev_input: Option<usize> = None;
        for index in (0..row_count).rev() {
            next_right_edges[index] = next_right_edge;
            if types::is_input_row(self.rows[index].type_mask) {
                if self.rows[index].has_statement {
                    self.align_statement_row(index)?;
                }
                let below_statement_width = prev_input
                    .filter(|&below| self.rows[below].has_statement)
                    .map(|below| self.rows[below].width);
                if let Some(below_width) =
                    below_statement_width.filter(|&w| self.rows[index].width < w)
                {
                    next_right_edges[index] = below_width;
                } else if self.rows[index].has_statement {
                    next_right_edge = self.rows[index].width;
                } else {
                    next_right_edge = next_right_edge.max(self.rows[index].width);
                }
                prev_input = Some(index);
            }
        }

        let mut prev_right_edge: f32 = 0.0;
        for index in 0..row_count {
            if self.rows[index].has_statement {
                prev_right_edge = self.desired_row_width(index);
            } else if types::is_spacer(self.rows[index].type_mask) {
                self.rows[index].width = prev_right_edge.max(next_right_edges[index]);
            } else {
                let desired = prev_right_edge.max(next_right_edges[index]);
                let missing = desired - self.rows[index].width;
                if missing > 0.0 {
                    self.add_alignment_padding(index, missing);
                }
                prev_right_edge = self.rows[index].width;
            }
        }
        Ok(())
    }

    fn add_alignment_padding(&mut self, index: usize, missing_space: f32) {
        let row = &mut self.rows[index];
        let first_spacer = row.first_spacer_index();
        let last_spacer = row.last_spacer_index();
        if row.has_external_input || row.has_statement {
            row.width_with_connected_blocks += missing_space;
        }
        match row.align {
            Some(Align::Right) => {
                if let Some(first) = first_spacer {
                    row.elements[first].width += missing_space;
                }
            }
            Some(Align::Centre) => {
                if let Some(first) = first_spacer {
                    row.elements[first].width += missing_space / 2.0;
                }
                if let Some(last) = last_spacer {
                    row.elements[last].width += missing_space / 2.0;
                }
            }
            _ => {
                if let Some(last) = last_spacer {
                    row.elements[last].width += missing_space;
                }
            }
        }
        row.width += missing_space;
    }

    fn align_statement_row(&mut self, index: usize) -> Result<(), RenderError> {
        let input_index = self.rows[index]
            .last_input_index()
            .ok_or(RenderError::MissingStatementInput)?;

        // First pad the fields out to the statement edge, then stretch the
        // statement input itself to the row's desired width.
        let inner_width = self.rows[index].width - self.rows[index].elements[input_index].width;
        let missing = self.statement_edge - inner_width;
        if missing > 0.0 {
            self.add_alignment_padding(index, missing);
        }

        let delta = self.desired_row_width(index) - self.rows[index].width;
        let row_height = self.rows[index].height;
        {
            let input = &mut self.rows[index].elements[input_index];
            input.width += delta;
            input.height = input.height.max(row_height);
        }
        let row = &mut self.rows[index];
        row.width += delta;
        row.width_with_connected_blocks = row
            .width
            .max(self.statement_edge + row.connected_block_widths);
        Ok(())
    }

    fn add_row_spacing(&mut self) {
        let old = std::mem::take(&mut self.rows);
        let spacer_width = self.width - self.start_x;

        let mut spacers: Vec<Option<Row<'b>>> = Vec::with_capacity(old.len());
        for pair in old.windows(2) {
            let height = self.policy.spacer_row_height(self.constants, &pair[0], &pair[1]);
            let mut spacer = Row::spacer(height, spacer_width);
            spacer.follows_statement = pair[0].has_statement;
            spacer.precedes_statement = pair[1].has_statement;
            spacers.push(Some(spacer));
        }

        let mut rows = Vec::with_capacity(old.len() * 2);
        for (i, row) in old.into_iter().enumerate() {
            rows.push(row);
            if let Some(spacer) = spacers.get_mut(i).and_then(Option::take) {
                rows.push(spacer);
            }
        }
        self.rows = rows;
    }

    fn finalize(&mut self) {
        // Pad the bottom row out to the block minimum before positions are
        // recorded. The hat does not count toward the minimum.
        let ascender_height = self.rows[0].ascender_height;
        let total: f32 = self.rows.iter().map(|row| row.height).sum();
        let height_without_hat = total - ascender_height;
        if height_without_hat < self.constants.min_block_height {
            let diff = self.constants.min_block_height - height_without_hat;
            if let Some(bottom) = self.rows.last_mut() {
                bottom.height += diff;
            }
        }

        self.adjust_dynamic_output();

        let dark_path_offset = self.policy.dark_path_offset();
        let mut widest_with_connected: f32 = 0.0;
        let mut y_cursor = 0.0;
        for index in 0..self.rows.len() {
            self.rows[index].y_pos = y_cursor;
            self.rows[index].x_pos = self.start_x;
            y_cursor += self.rows[index].height;
            widest_with_connected =
                widest_with_connected.max(self.rows[index].width_with_connected_blocks);
            self.record_elem_positions(index);
        }

        if self.output_connection.is_some() {
            if let Some(target) = self.block.next_connection().and_then(|c| c.target_block()) {
                widest_with_connected =
                    widest_with_connected.max(target.height_width().width() - dark_path_offset);
            }
        }

        self.width_with_children = widest_with_connected + self.start_x + dark_path_offset;
        self.width += dark_path_offset;
        self.height = y_cursor + dark_path_offset;
        self.start_y = self.rows[0].capline;
        if let Some(bottom) = self.rows.last_mut() {
            bottom.baseline = y_cursor - bottom.descender_height;
        }
    }

    /// Dynamic output shapes take their dimensions from the finished block
    /// height, so they are sized here rather than at construction.
    fn adjust_dynamic_output(&mut self) {
        let total: f32 = self.rows.iter().map(|row| row.height).sum();
        let Some(output) = self.output_connection.as_mut() else {
            return;
        };
        let Some(info) = output.connection_info_mut() else {
            return;
        };
        if !info.shape.is_dynamic() {
            return;
        }
        let connection_height = info.shape.height_for(total);
        let connection_width = info.shape.width_for(total);
        let (offset_x, offset_y) = match &info.shape {
            crate::constants::shapes::ConnectionShape::Dynamic(shape) => (
                shape.connection_offset_x(connection_width),
                shape.connection_offset_y(connection_height),
            ),
            _ => (0.0, 0.0),
        };
        if let ConnectionRole::Output(out) = &mut info.role {
            out.start_x = connection_width;
            out.connection_offset_x = offset_x;
            out.connection_offset_y = offset_y;
        }
        output.height = connection_height;
        output.width = connection_width;

        self.start_x = connection_width;
        self.width += connection_width;
        self.width_with_children += connection_width;
    }

    fn record_elem_positions(&mut self, index: usize) {
        let mut x_cursor = self.rows[index].x_pos;
        for elem_index in 0..self.rows[index].elements.len() {
            if self.rows[index].elements[elem_index].is(types::SPACER) {
                let row_height = self.rows[index].height;
                self.rows[index].elements[elem_index].height = row_height;
            }
            self.rows[index].elements[elem_index].x_pos = x_cursor;
            let centerline = self.policy.elem_centerline(
                self.constants,
                &self.rows[index],
                &self.rows[index].elements[elem_index],
            );
            self.rows[index].elements[elem_index].centerline = centerline;
            x_cursor += self.rows[index].elements[elem_index].width;
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use tenon_core::model::simple::{Block, Field, Input};

    use super::*;

    fn constants() -> ConstantProvider {
        let mut constants = ConstantProvider::new();
        constants.init();
        constants
    }

    fn measured<'b>(
        block: &'b Block,
        constants: &'b ConstantProvider,
        policy: &'b BasePolicy,
    ) -> RenderInfo<'b> {
        let mut info = RenderInfo::new(block, constants, policy).unwrap();
        info.measure().unwrap();
        info
    }

    #[test]
    fn test_row_structure_for_simple_block() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_previous()
            .with_next()
            .with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
        let info = measured(&block, &constants, &policy);

        // Top, spacer, input, spacer, bottom.
        assert_eq!(info.rows.len(), 5);
        assert!(info.rows[0].is(types::TOP_ROW));
        assert!(info.rows[1].is(types::BETWEEN_ROW_SPACER));
        assert!(info.rows[2].is(types::INPUT_ROW));
        assert!(info.rows[4].is(types::BOTTOM_ROW));
        assert!(info.rows[0].has_previous_connection);
        assert!(info.rows[4].has_next_connection);
        assert!(info.is_measured());
    }

    #[test]
    fn test_dummy_block_height() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new().with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
        let info = measured(&block, &constants, &policy);

        // 5 top + 5 spacer + 15 dummy row + 5 spacer + 5 bottom.
        assert_approx_eq!(f32, info.rows[2].height, 15.0);
        assert_approx_eq!(f32, info.height, 35.0);
        assert_approx_eq!(f32, info.start_y, 0.0);
        // No connections, so both left corners are rounded.
        assert!(info.rows[0].elements[0].is(types::LEFT_ROUND_CORNER));
        assert!(info.rows[4].elements[0].is(types::LEFT_ROUND_CORNER));
    }

    #[test]
    fn test_empty_block_padded_to_min_height() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new();
        let info = measured(&block, &constants, &policy);

        assert_eq!(info.rows.len(), 3);
        assert_approx_eq!(f32, info.height, constants.min_block_height);
    }

    #[test]
    fn test_collapsed_block_gets_jagged_edge_only() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_input(Input::value().with_field(Field::label(40.0, 13.0)))
            .collapsed();
        let info = measured(&block, &constants, &policy);

        let content_row = &info.rows[2];
        assert!(content_row.has_jagged_edge);
        let jagged: Vec<_> = content_row
            .elements
            .iter()
            .filter(|e| e.is(types::JAGGED_EDGE))
            .collect();
        assert_eq!(jagged.len(), 1);
        assert_approx_eq!(f32, jagged[0].width, 6.0);
        assert_approx_eq!(f32, jagged[0].height, 12.0);
        assert!(!content_row.elements.iter().any(|e| e.is(types::INPUT)));
    }

    #[test]
    fn test_statement_rows_share_statement_edge() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_input(Input::statement().with_field(Field::label(30.0, 13.0)))
            .with_input(Input::statement().with_field(Field::label(80.0, 13.0)));
        let info = measured(&block, &constants, &policy);

        let statement_rows: Vec<_> = info.rows.iter().filter(|r| r.has_statement).collect();
        assert_eq!(statement_rows.len(), 2);
        let edge = info.statement_edge;
        assert!(edge > 0.0);
        for row in &statement_rows {
            assert_approx_eq!(f32, row.statement_edge, edge);
            // The statement input reaches the right boundary of the block.
            let input = row.last_input().unwrap();
            let inner: f32 = row
                .elements
                .iter()
                .take_while(|e| !e.is(types::STATEMENT_INPUT))
                .map(|e| e.width)
                .sum();
            assert_approx_eq!(f32, inner + input.width, info.width - info.start_x);
        }
    }

    #[test]
    fn test_alignment_padding_direction() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_input(Input::dummy().with_field(Field::label(100.0, 13.0)))
            .with_input(
                Input::dummy()
                    .with_field(Field::label(20.0, 13.0))
                    .with_align(Align::Right),
            );
        let info = measured(&block, &constants, &policy);

        let narrow = &info.rows[4];
        assert!(narrow.is(types::INPUT_ROW));
        assert_eq!(narrow.align, Some(Align::Right));
        // Right alignment grows the leading spacer.
        let first_spacer = narrow.first_spacer_index().unwrap();
        let last_spacer = narrow.last_spacer_index().unwrap();
        assert!(narrow.elements[first_spacer].width > narrow.elements[last_spacer].width);
        assert_approx_eq!(f32, narrow.width, info.rows[2].width);
    }

    #[test]
    fn test_external_input_row_widths_include_children() {
        let constants = constants();
        let policy = BasePolicy;
        let child = Block::new().with_output().with_reported_size(50.0, 30.0);
        let block = Block::new().with_input(Input::value().with_child(child));
        let info = measured(&block, &constants, &policy);

        assert!(info.width_with_children > info.width);
    }

    #[test]
    fn test_remeasure_is_idempotent() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_previous()
            .with_inline_inputs()
            .with_input(Input::value().with_field(Field::label(25.0, 13.0)))
            .with_input(Input::statement());

        let first = measured(&block, &constants, &policy);
        let second = measured(&block, &constants, &policy);
        assert_approx_eq!(f32, first.width, second.width);
        assert_approx_eq!(f32, first.height, second.height);
        assert_approx_eq!(f32, first.statement_edge, second.statement_edge);
        assert_eq!(first.rows.len(), second.rows.len());
        for (a, b) in first.rows.iter().zip(second.rows.iter()) {
            assert_approx_eq!(f32, a.width, b.width);
            assert_approx_eq!(f32, a.height, b.height);
        }
    }

    #[test]
    fn test_output_block_starts_after_tab() {
        let constants = constants();
        let policy = BasePolicy;
        let block = Block::new()
            .with_output()
            .with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
        let info = measured(&block, &constants, &policy);

        assert_approx_eq!(f32, info.start_x, 8.0);
        for row in &info.rows {
            assert_approx_eq!(f32, row.x_pos, 8.0);
        }
        // Output blocks square their top-left corner.
        assert!(info.rows[0].elements[0].is(types::LEFT_SQUARE_CORNER));
    }
}
