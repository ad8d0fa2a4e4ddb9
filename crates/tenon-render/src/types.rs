//! Bit-flag type tags for measurables and rows.
//!
//! Tags combine, so a statement input element carries
//! `INPUT | STATEMENT_INPUT | CONNECTION` and predicates test membership with
//! a mask. The base flags below occupy the low 24 bits; [`TypeRegistry`]
//! hands out fresh bits above them so renderer extensions can introduce new
//! part kinds without a closed enum. The ceiling is the width of `u64`:
//! 40 extension bits.

use std::collections::HashMap;

use crate::error::RenderError;

pub const NONE: u64 = 0;
pub const FIELD: u64 = 1 << 0;
pub const HAT: u64 = 1 << 1;
pub const ICON: u64 = 1 << 2;
pub const SPACER: u64 = 1 << 3;
pub const BETWEEN_ROW_SPACER: u64 = 1 << 4;
pub const IN_ROW_SPACER: u64 = 1 << 5;
pub const EXTERNAL_VALUE_INPUT: u64 = 1 << 6;
pub const INPUT: u64 = 1 << 7;
pub const INLINE_INPUT: u64 = 1 << 8;
pub const STATEMENT_INPUT: u64 = 1 << 9;
pub const CONNECTION: u64 = 1 << 10;
pub const PREVIOUS_CONNECTION: u64 = 1 << 11;
pub const NEXT_CONNECTION: u64 = 1 << 12;
pub const OUTPUT_CONNECTION: u64 = 1 << 13;
pub const CORNER: u64 = 1 << 14;
pub const LEFT_SQUARE_CORNER: u64 = 1 << 15;
pub const LEFT_ROUND_CORNER: u64 = 1 << 16;
pub const RIGHT_SQUARE_CORNER: u64 = 1 << 17;
pub const RIGHT_ROUND_CORNER: u64 = 1 << 18;
pub const JAGGED_EDGE: u64 = 1 << 19;
pub const ROW: u64 = 1 << 20;
pub const TOP_ROW: u64 = 1 << 21;
pub const BOTTOM_ROW: u64 = 1 << 22;
pub const INPUT_ROW: u64 = 1 << 23;

pub const LEFT_CORNER: u64 = LEFT_SQUARE_CORNER | LEFT_ROUND_CORNER;
pub const RIGHT_CORNER: u64 = RIGHT_SQUARE_CORNER | RIGHT_ROUND_CORNER;

/// The first bit available to [`TypeRegistry`].
const FIRST_EXTENSION_BIT: u64 = 1 << 24;

pub fn is_field(tag: u64) -> bool {
    tag & FIELD != 0
}

pub fn is_hat(tag: u64) -> bool {
    tag & HAT != 0
}

pub fn is_icon(tag: u64) -> bool {
    tag & ICON != 0
}

pub fn is_spacer(tag: u64) -> bool {
    tag & SPACER != 0
}

pub fn is_in_row_spacer(tag: u64) -> bool {
    tag & IN_ROW_SPACER != 0
}

pub fn is_input(tag: u64) -> bool {
    tag & INPUT != 0
}

pub fn is_external_input(tag: u64) -> bool {
    tag & EXTERNAL_VALUE_INPUT != 0
}

pub fn is_inline_input(tag: u64) -> bool {
    tag & INLINE_INPUT != 0
}

pub fn is_statement_input(tag: u64) -> bool {
    tag & STATEMENT_INPUT != 0
}

pub fn is_previous_connection(tag: u64) -> bool {
    tag & PREVIOUS_CONNECTION != 0
}

pub fn is_next_connection(tag: u64) -> bool {
    tag & NEXT_CONNECTION != 0
}

pub fn is_previous_or_next_connection(tag: u64) -> bool {
    tag & (PREVIOUS_CONNECTION | NEXT_CONNECTION) != 0
}

pub fn is_left_rounded_corner(tag: u64) -> bool {
    tag & CORNER != 0 && tag & LEFT_ROUND_CORNER != 0
}

pub fn is_right_rounded_corner(tag: u64) -> bool {
    tag & CORNER != 0 && tag & RIGHT_ROUND_CORNER != 0
}

pub fn is_left_square_corner(tag: u64) -> bool {
    tag & CORNER != 0 && tag & LEFT_SQUARE_CORNER != 0
}

pub fn is_right_square_corner(tag: u64) -> bool {
    tag & CORNER != 0 && tag & RIGHT_SQUARE_CORNER != 0
}

pub fn is_corner(tag: u64) -> bool {
    tag & CORNER != 0
}

pub fn is_jagged_edge(tag: u64) -> bool {
    tag & JAGGED_EDGE != 0
}

pub fn is_row(tag: u64) -> bool {
    tag & ROW != 0
}

pub fn is_between_row_spacer(tag: u64) -> bool {
    tag & BETWEEN_ROW_SPACER != 0
}

pub fn is_top_row(tag: u64) -> bool {
    tag & TOP_ROW != 0
}

pub fn is_bottom_row(tag: u64) -> bool {
    tag & BOTTOM_ROW != 0
}

pub fn is_top_or_bottom_row(tag: u64) -> bool {
    tag & (TOP_ROW | BOTTOM_ROW) != 0
}

pub fn is_input_row(tag: u64) -> bool {
    tag & INPUT_ROW != 0
}

/// Allocator for extension type bits, keyed by name. Asking for the same
/// name twice returns the same bit.
#[derive(Debug)]
pub struct TypeRegistry {
    by_name: HashMap<String, u64>,
    next: u64,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            by_name: HashMap::new(),
            next: FIRST_EXTENSION_BIT,
        }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bit for `name`, allocating a fresh one on first use.
    pub fn get_type(&mut self, name: &str) -> Result<u64, RenderError> {
        if let Some(&bit) = self.by_name.get(name) {
            return Ok(bit);
        }
        if self.next == 0 {
            return Err(RenderError::TypeSpaceExhausted(name.to_string()));
        }
        let bit = self.next;
        self.next = self.next.wrapping_shl(1);
        self.by_name.insert(name.to_string(), bit);
        Ok(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_tags() {
        let statement = INPUT | STATEMENT_INPUT | CONNECTION;
        assert!(is_input(statement));
        assert!(is_statement_input(statement));
        assert!(!is_external_input(statement));

        let corner = CORNER | LEFT_ROUND_CORNER;
        assert!(is_left_rounded_corner(corner));
        assert!(!is_left_square_corner(corner));
    }

    #[test]
    fn test_registry_reuses_names() {
        let mut registry = TypeRegistry::new();
        let a = registry.get_type("bubble").unwrap();
        let b = registry.get_type("bubble").unwrap();
        let c = registry.get_type("gutter").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, 1 << 24);
        assert_eq!(c, 1 << 25);
    }

    #[test]
    fn test_registry_exhausts_at_word_width() {
        let mut registry = TypeRegistry::new();
        for i in 0..40 {
            registry.get_type(&format!("ext{i}")).unwrap();
        }
        assert!(matches!(
            registry.get_type("one_too_many"),
            Err(RenderError::TypeSpaceExhausted(_))
        ));
    }
}
