//! Rows of measured elements.
//!
//! A block's layout is a vertical stack of rows: a top row, input rows
//! separated by spacer rows, and a bottom row. A row owns its elements and
//! re-derives its own size from them in [`Row::measure`]; everything else on
//! a row is bookkeeping written by the measurement passes.

use tenon_core::model::Align;

use crate::measurables::Element;
use crate::types;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Top,
    Bottom,
    Input,
    Spacer,
}

#[derive(Debug)]
pub struct Row<'b> {
    pub kind: RowKind,
    pub type_mask: u64,
    pub elements: Vec<Element<'b>>,

    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
    /// Row width including blocks connected to external value and statement
    /// inputs.
    pub width_with_connected_blocks: f32,
    pub connected_block_widths: f32,

    /// Left edge relative to the block origin.
    pub x_pos: f32,
    /// Top edge relative to the block origin.
    pub y_pos: f32,

    /// Alignment adopted from the first aligned input on the row.
    pub align: Option<Align>,

    pub has_external_input: bool,
    pub has_statement: bool,
    pub has_inline_input: bool,
    pub has_dummy_input: bool,
    pub has_jagged_edge: bool,

    /// Where statement inputs start, shared by every statement row on the
    /// block.
    pub statement_edge: f32,

    // Top row only.
    pub capline: f32,
    pub ascender_height: f32,
    pub has_previous_connection: bool,

    // Bottom row only.
    pub baseline: f32,
    pub descender_height: f32,
    pub has_next_connection: bool,

    // Spacer rows only.
    pub follows_statement: bool,
    pub precedes_statement: bool,
}

impl<'b> Row<'b> {
    fn empty(kind: RowKind, type_mask: u64) -> Self {
        Self {
            kind,
            type_mask,
            elements: Vec::new(),
            width: 0.0,
            height: 0.0,
            min_width: 0.0,
            min_height: 0.0,
            width_with_connected_blocks: 0.0,
            connected_block_widths: 0.0,
            x_pos: 0.0,
            y_pos: 0.0,
            align: None,
            has_external_input: false,
            has_statement: false,
            has_inline_input: false,
            has_dummy_input: false,
            has_jagged_edge: false,
            statement_edge: 0.0,
            capline: 0.0,
            ascender_height: 0.0,
            has_previous_connection: false,
            baseline: 0.0,
            descender_height: 0.0,
            has_next_connection: false,
            follows_statement: false,
            precedes_statement: false,
        }
    }

    pub fn top() -> Self {
        Self::empty(RowKind::Top, types::ROW | types::TOP_ROW)
    }

    pub fn bottom() -> Self {
        Self::empty(RowKind::Bottom, types::ROW | types::BOTTOM_ROW)
    }

    pub fn input() -> Self {
        Self::empty(RowKind::Input, types::ROW | types::INPUT_ROW)
    }

    /// A between-row spacer with a fixed size.
    pub fn spacer(height: f32, width: f32) -> Self {
        let mut row = Self::empty(
            RowKind::Spacer,
            types::ROW | types::SPACER | types::BETWEEN_ROW_SPACER,
        );
        row.height = height;
        row.width = width;
        row.width_with_connected_blocks = width;
        row
    }

    pub fn is(&self, mask: u64) -> bool {
        self.type_mask & mask != 0
    }

    /// Re-derives the row's size from its elements.
    pub fn measure(&mut self) {
        match self.kind {
            // Spacer rows keep the size they were created with.
            RowKind::Spacer => {}
            RowKind::Top => {
                let mut width = 0.0;
                let mut height: f32 = 0.0;
                let mut ascender_height: f32 = 0.0;
                for elem in &self.elements {
                    width += elem.width;
                    if !elem.is(types::SPACER) {
                        if elem.is(types::HAT) {
                            ascender_height = ascender_height.max(elem.height);
                        } else {
                            height = height.max(elem.height);
                        }
                    }
                }
                self.width = self.min_width.max(width);
                self.ascender_height = ascender_height;
                self.height = self.min_height.max(height) + ascender_height;
                self.capline = ascender_height;
                self.width_with_connected_blocks = self.width;
            }
            RowKind::Bottom => {
                let mut width = 0.0;
                let mut height: f32 = 0.0;
                let mut descender_height: f32 = 0.0;
                for elem in &self.elements {
                    width += elem.width;
                    if !elem.is(types::SPACER) {
                        // The next connection hangs below the bottom edge,
                        // so it contributes to the descender rather than
                        // the row body.
                        if elem.is(types::NEXT_CONNECTION) {
                            descender_height = descender_height.max(elem.height);
                        } else {
                            height = height.max(elem.height);
                        }
                    }
                }
                self.width = self.min_width.max(width);
                self.height = self.min_height.max(height) + descender_height;
                self.descender_height = descender_height;
                self.width_with_connected_blocks = self.width;
            }
            RowKind::Input => {
                let mut connected_block_widths = 0.0;
                let mut height: f32 = 0.0;
                let mut width = self.min_width;
                for elem in &self.elements {
                    width += elem.width;
                    if elem.is(types::INPUT) {
                        if let Some(info) = elem.input_info() {
                            if elem.is(types::STATEMENT_INPUT) {
                                connected_block_widths += info.connected_block_width;
                            } else if elem.is(types::EXTERNAL_VALUE_INPUT)
                                && info.connected_block_width != 0.0
                            {
                                connected_block_widths +=
                                    info.connected_block_width - info.connection_width;
                            }
                        }
                    }
                    if !elem.is(types::SPACER) {
                        height = height.max(elem.height);
                    }
                }
                self.connected_block_widths = connected_block_widths;
                self.width = width;
                self.height = self.min_height.max(height);
                self.width_with_connected_blocks = width + connected_block_widths;
            }
        }
    }

    /// Whether the row takes a leading in-row spacer.
    pub fn starts_with_elem_spacer(&self) -> bool {
        !matches!(self.kind, RowKind::Top | RowKind::Bottom)
    }

    /// Whether the row takes a trailing in-row spacer.
    pub fn ends_with_elem_spacer(&self) -> bool {
        match self.kind {
            RowKind::Input => !self.has_external_input && !self.has_statement,
            _ => true,
        }
    }

    pub fn last_input(&self) -> Option<&Element<'b>> {
        self.elements.iter().rev().find(|e| e.is(types::INPUT))
    }

    pub fn last_input_index(&self) -> Option<usize> {
        self.elements.iter().rposition(|e| e.is(types::INPUT))
    }

    pub fn first_spacer_index(&self) -> Option<usize> {
        self.elements.iter().position(|e| e.is(types::SPACER))
    }

    pub fn last_spacer_index(&self) -> Option<usize> {
        self.elements.iter().rposition(|e| e.is(types::SPACER))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use tenon_core::model::simple::{Block, Field, Input};

    use crate::constants::ConstantProvider;

    use super::*;

    fn constants() -> ConstantProvider {
        let mut constants = ConstantProvider::new();
        constants.init();
        constants
    }

    #[test]
    fn test_top_row_hat_contributes_to_ascender() {
        let constants = constants();
        let mut row = Row::top();
        row.min_height = constants.top_row_min_height;
        row.elements.push(Element::square_corner(true));
        row.elements.push(Element::hat(&constants));
        row.elements.push(Element::square_corner(false));
        row.measure();

        assert_approx_eq!(f32, row.ascender_height, 15.0);
        assert_approx_eq!(f32, row.capline, 15.0);
        // Hat height lands in the ascender, not the row body.
        assert_approx_eq!(f32, row.height, 5.0 + 15.0);
        assert_approx_eq!(f32, row.width, 100.0);
    }

    #[test]
    fn test_bottom_row_descender_from_next_connection() {
        let constants = constants();
        let block = Block::new().with_next();
        let mut row = Row::bottom();
        row.min_height = constants.bottom_row_min_height;
        row.elements.push(Element::square_corner(true));
        row.elements
            .push(Element::next_connection(&constants, block.next_ref().unwrap()).unwrap());
        row.elements.push(Element::square_corner(false));
        row.measure();

        assert_approx_eq!(f32, row.descender_height, 4.0);
        assert_approx_eq!(f32, row.height, 5.0 + 4.0);
        assert_approx_eq!(f32, row.width, 15.0);
    }

    #[test]
    fn test_input_row_sums_widths_and_tracks_connected_blocks() {
        let constants = constants();
        let field = Field::label(40.0, 13.0);
        let child = Block::new().with_output().with_reported_size(50.0, 30.0);
        let input = Input::value().with_child(child);

        let mut row = Row::input();
        row.elements.push(Element::field(&field));
        row.elements
            .push(Element::external_value_input(&constants, &input).unwrap());
        row.has_external_input = true;
        row.measure();

        let input_width = 8.0 + 2.0;
        assert_approx_eq!(f32, row.width, 40.0 + input_width);
        // The connected block overlaps the tab, so its connection width is
        // not double counted.
        assert_approx_eq!(
            f32,
            row.width_with_connected_blocks,
            40.0 + input_width + (50.0 - 8.0)
        );
        assert!(!row.ends_with_elem_spacer());
    }

    #[test]
    fn test_spacer_row_ignores_measure() {
        let mut row = Row::spacer(6.0, 80.0);
        row.measure();
        assert_approx_eq!(f32, row.height, 6.0);
        assert_approx_eq!(f32, row.width, 80.0);
        assert!(row.is(types::BETWEEN_ROW_SPACER));
    }
}
