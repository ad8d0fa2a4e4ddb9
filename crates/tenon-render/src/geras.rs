//! The geras renderer: the classic look with a drop-shadow edge.
//!
//! Geras blocks reserve one pixel on their right and bottom edges for a dark
//! path, use a denser spacing table than the base renderer, and align inline
//! rows to their vertical neighbors instead of the full block width.

use crate::constants::{ConstantProvider, Variant};
use crate::info::LayoutPolicy;
use crate::measurables::Element;
use crate::measurables::rows::Row;
use crate::types;

/// Width of the dark path drawn along the bottom and right edges.
pub const DARK_PATH_OFFSET: f32 = 1.0;

/// A constant provider with the geras renderer's values.
pub fn constants() -> ConstantProvider {
    ConstantProvider::new().with_variant(Variant::Geras)
}

/// The geras renderer's layout rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct GerasPolicy;

impl LayoutPolicy for GerasPolicy {
    fn dark_path_offset(&self) -> f32 {
        DARK_PATH_OFFSET
    }

    // Geras uses the same dummy minimum for shadow and regular blocks.
    fn dummy_input_min_height(&self, constants: &ConstantProvider, _is_shadow: bool) -> f32 {
        constants.dummy_input_min_height
    }

    // Inline rows keep their own alignment.
    fn adopts_input_alignment(&self, is_inline: bool) -> bool {
        !is_inline
    }

    fn bottom_row_min_height(&self, constants: &ConstantProvider, follows_statement: bool) -> f32 {
        if follows_statement {
            constants.bottom_row_after_statement_min_height
        } else {
            constants.medium_padding - DARK_PATH_OFFSET
        }
    }

    fn in_row_spacing(
        &self,
        constants: &ConstantProvider,
        prev: Option<&Element>,
        next: Option<&Element>,
        rtl: bool,
    ) -> f32 {
        let Some(prev) = prev else {
            // Row start.
            if let Some(next) = next {
                if next.is_editable_field() {
                    return constants.medium_padding;
                }
                if next.is(types::INLINE_INPUT) {
                    return constants.medium_large_padding;
                }
                if next.is(types::STATEMENT_INPUT) {
                    return constants.statement_input_padding_left;
                }
            }
            return constants.large_padding;
        };

        // Between a non-input and the end of the row (or a statement input,
        // which acts as one).
        if !prev.is(types::INPUT)
            && (next.is_none() || next.is_some_and(|n| n.is(types::STATEMENT_INPUT)))
        {
            if prev.is_editable_field() {
                return if prev.width == 0.0 {
                    constants.no_padding
                } else {
                    constants.medium_padding
                };
            }
            if prev.is(types::ICON) {
                return constants.large_padding * 2.0 + 1.0;
            }
            if prev.is(types::HAT) {
                return constants.no_padding;
            }
            if types::is_previous_or_next_connection(prev.type_mask) {
                return constants.large_padding;
            }
            if types::is_left_rounded_corner(prev.type_mask) {
                return constants.min_block_width;
            }
            if prev.is(types::JAGGED_EDGE) {
                return constants.no_padding;
            }
            return constants.large_padding;
        }

        // Between an input and the end of the row.
        if prev.is(types::INPUT) && next.is_none() {
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

        let Some(next) = next else {
            return constants.medium_padding;
        };

        // Between a non-input and an input.
        if !prev.is(types::INPUT) && next.is(types::INPUT) {
            if prev.is_editable_field() {
                if next.is(types::INLINE_INPUT) || next.is(types::EXTERNAL_VALUE_INPUT) {
                    return constants.small_padding;
                }
            } else {
                if next.is(types::INLINE_INPUT) || next.is(types::EXTERNAL_VALUE_INPUT) {
                    return constants.medium_large_padding;
                }
                if next.is(types::STATEMENT_INPUT) {
                    return constants.large_padding;
                }
            }
            return constants.large_padding - 1.0;
        }

        // Between an icon and an icon or field.
        if prev.is(types::ICON) && !next.is(types::INPUT) {
            return constants.large_padding;
        }

        // Between an inline input and a field.
        if prev.is(types::INLINE_INPUT) && next.is(types::FIELD) {
            return if next.is_editable_field() {
                constants.medium_padding
            } else {
                constants.large_padding
            };
        }

        if types::is_left_square_corner(prev.type_mask) {
            if next.is(types::HAT) {
                return constants.no_padding;
            }
            if types::is_previous_connection(next.type_mask) {
                return next.notch_offset;
            }
            if types::is_next_connection(next.type_mask) {
                // The dark path shifts the bottom notch slightly.
                let offset = if rtl { 1.0 } else { -1.0 } * DARK_PATH_OFFSET / 2.0;
                return next.notch_offset + offset;
            }
        }

        if types::is_left_rounded_corner(prev.type_mask) {
            if types::is_previous_connection(next.type_mask) {
                return next.notch_offset - constants.corner_radius;
            }
            if types::is_next_connection(next.type_mask) {
                let offset = if rtl { 1.0 } else { -1.0 } * DARK_PATH_OFFSET / 2.0;
                return next.notch_offset - constants.corner_radius + offset;
            }
        }

        // Between two fields of the same editability.
        if prev.is(types::FIELD)
            && next.is(types::FIELD)
            && prev.is_editable_field() == next.is_editable_field()
        {
            return if prev.width == 0.0 {
                constants.no_padding
            } else {
                constants.large_padding
            };
        }

        if next.is(types::JAGGED_EDGE) {
            return constants.large_padding;
        }

        constants.medium_padding
    }

    fn trailing_spacer_extra(
        &self,
        constants: &ConstantProvider,
        row: &Row,
        block_has_external_inputs: bool,
    ) -> f32 {
        // Dummy rows on blocks with external inputs leave room for the tab
        // so the right edge stays flush.
        if block_has_external_inputs && row.has_dummy_input {
            constants.tab_width
        } else {
            0.0
        }
    }

    fn spacer_row_height(&self, constants: &ConstantProvider, prev: &Row, next: &Row) -> f32 {
        if prev.is(types::TOP_ROW) && next.is(types::BOTTOM_ROW) {
            return constants.empty_block_spacer_height;
        }
        // The top and bottom rows act as spacers themselves.
        if prev.is(types::TOP_ROW) || next.is(types::BOTTOM_ROW) {
            return constants.no_padding;
        }
        if prev.has_external_input && next.has_external_input {
            return constants.large_padding;
        }
        if !prev.has_statement && next.has_statement {
            return constants.between_statement_padding_y;
        }
        if prev.has_statement && next.has_statement {
            return constants.large_padding;
        }
        if !prev.has_statement && next.has_dummy_input {
            return constants.large_padding;
        }
        if prev.has_dummy_input {
            return constants.large_padding;
        }
        constants.medium_padding
    }

    fn elem_centerline(&self, constants: &ConstantProvider, row: &Row, elem: &Element) -> f32 {
        if elem.is(types::SPACER) || types::is_top_or_bottom_row(row.type_mask) {
            return crate::info::base_elem_centerline(row, elem);
        }
        let mut result = row.y_pos;
        if elem.is(types::FIELD) || elem.is(types::ICON) {
            result += elem.height / 2.0;
            // Fields on tall rows sit below the row center.
            if (row.has_inline_input || row.has_statement)
                && elem.height + constants.tall_input_field_offset_y <= row.height
            {
                result += constants.tall_input_field_offset_y;
            }
        } else if elem.is(types::INLINE_INPUT) {
            result += elem.height / 2.0;
        } else {
            result += row.height / 2.0;
        }
        result
    }

    fn aligns_inline_rows(&self) -> bool {
        true
    }

    fn caps_inline_statement_width(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use tenon_core::model::simple::{Block, Field, Input};

    use crate::info::RenderInfo;

    use super::*;

    fn initialized() -> ConstantProvider {
        let mut constants = constants();
        constants.init();
        constants
    }

    #[test]
    fn test_dummy_block_dimensions() {
        let constants = initialized();
        let policy = GerasPolicy;
        let block = Block::new().with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
        let mut info = RenderInfo::new(&block, &constants, &policy).unwrap();
        info.measure().unwrap();

        // The dummy row is padded large on both sides, and the block
        // reserves one pixel of dark path on each axis.
        assert_approx_eq!(f32, info.rows[2].width, 10.0 + 40.0 + 10.0);
        assert_approx_eq!(f32, info.width, 60.0 + DARK_PATH_OFFSET);
        // Rows adjacent to the top and bottom rows get no extra spacing.
        assert_approx_eq!(f32, info.rows[1].height, 0.0);
        assert_approx_eq!(f32, info.height, 5.0 + 15.0 + 4.0 + DARK_PATH_OFFSET);
    }

    #[test]
    fn test_spacing_at_row_start() {
        let constants = initialized();
        let policy = GerasPolicy;

        let editable = Field::editable(30.0, 13.0);
        let editable_elem = Element::field(&editable);
        assert_approx_eq!(
            f32,
            policy.in_row_spacing(&constants, None, Some(&editable_elem), false),
            5.0
        );

        let label = Field::label(30.0, 13.0);
        let label_elem = Element::field(&label);
        assert_approx_eq!(
            f32,
            policy.in_row_spacing(&constants, None, Some(&label_elem), false),
            10.0
        );

        let input = Input::statement();
        let statement = Element::statement_input(&constants, &input, 1.0).unwrap();
        assert_approx_eq!(
            f32,
            policy.in_row_spacing(&constants, None, Some(&statement), false),
            20.0
        );
    }

    #[test]
    fn test_corner_to_notch_spacing_shifts_with_direction() {
        let constants = initialized();
        let policy = GerasPolicy;
        let block = Block::new().with_next();
        let corner = Element::square_corner(true);
        let notch = Element::next_connection(&constants, block.next_ref().unwrap()).unwrap();

        let ltr = policy.in_row_spacing(&constants, Some(&corner), Some(&notch), false);
        let rtl = policy.in_row_spacing(&constants, Some(&corner), Some(&notch), true);
        assert_approx_eq!(f32, ltr, 15.0 - 0.5);
        assert_approx_eq!(f32, rtl, 15.0 + 0.5);
    }

    #[test]
    fn test_tall_row_pushes_fields_down() {
        let constants = initialized();
        let policy = GerasPolicy;
        let child = Block::new().with_output().with_reported_size(50.0, 40.0);
        let block = Block::new()
            .with_inline_inputs()
            .with_input(
                Input::value()
                    .with_field(Field::label(20.0, 13.0))
                    .with_child(child),
            );
        let mut info = RenderInfo::new(&block, &constants, &policy).unwrap();
        info.measure().unwrap();

        let row = info
            .rows
            .iter()
            .find(|r| r.has_inline_input)
            .expect("inline row");
        let field = row
            .elements
            .iter()
            .find(|e| e.is(types::FIELD))
            .expect("field");
        // Field centerline sits half its height below the row top, plus the
        // tall-row offset.
        assert_approx_eq!(f32, field.centerline, row.y_pos + 13.0 / 2.0 + 5.0);
    }

    #[test]
    fn test_empty_geras_block_uses_empty_spacer() {
        let constants = initialized();
        let policy = GerasPolicy;
        let block = Block::new();
        let mut info = RenderInfo::new(&block, &constants, &policy).unwrap();
        info.measure().unwrap();

        // Top 5 + empty spacer 16 + bottom (5 - dark path) = 25, plus the
        // dark path offset.
        assert_approx_eq!(f32, info.rows[1].height, 16.0);
        assert_approx_eq!(f32, info.height, 5.0 + 16.0 + 4.0 + 1.0);
    }

    #[test]
    fn test_inline_statement_rows_cap_bottom_width() {
        let constants = initialized();
        let policy = GerasPolicy;
        let block = Block::new()
            .with_inline_inputs()
            .with_input(Input::dummy().with_field(Field::label(200.0, 13.0)))
            .with_input(Input::statement());
        let mut info = RenderInfo::new(&block, &constants, &policy).unwrap();
        info.measure().unwrap();

        let statement_row = info.rows.iter().find(|r| r.has_statement).expect("row");
        // The statement row stops at the capped bottom width instead of
        // stretching to the 200-wide field row.
        assert!(statement_row.width < info.width - info.start_x);
        assert_approx_eq!(
            f32,
            statement_row.width,
            info.statement_edge + constants.max_bottom_width
        );
    }
}
