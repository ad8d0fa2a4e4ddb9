//! Geometric constants and shape construction.
//!
//! A [`ConstantProvider`] owns every number the layout passes consult:
//! paddings, notch and tab dimensions, row minimums, component colours. It
//! is long-lived (one per renderer, shared across many renders) and mutable
//! only through [`ConstantProvider::set_theme`] and
//! [`ConstantProvider::init`], which must be called between renders, never
//! during one.
//!
//! `init` precomputes the shape set (puzzle tab, notch, corners, hat, jagged
//! teeth) from the current constant values. Rendering before `init` fails
//! with [`RenderError::ShapesNotInitialized`].

use std::collections::HashMap;

use log::debug;

use tenon_core::color::Color;
use tenon_core::model::{ConnectionKind, ConnectionLike, HatStyle};
use tenon_core::theme::{BlockStyle, Theme};

use crate::error::RenderError;

pub mod shapes;

use shapes::{ConnectionShape, ShapeSet};

/// Which renderer's rules a provider follows where they differ (shape
/// construction and colour derivation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    Base,
    Geras,
    Zelos,
}

/// A block style with every colour resolved and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBlockStyle {
    pub colour_primary: Color,
    pub colour_secondary: Color,
    pub colour_tertiary: Color,
    pub hat: Option<HatStyle>,
}

/// All geometric constants for one renderer, plus the derived shape set.
#[derive(Debug, Clone)]
pub struct ConstantProvider {
    pub no_padding: f32,
    pub small_padding: f32,
    pub medium_padding: f32,
    pub medium_large_padding: f32,
    pub large_padding: f32,

    /// Offset from the top of a tall row to a field's vertical center.
    pub tall_input_field_offset_y: f32,

    pub tab_height: f32,
    pub tab_offset_from_top: f32,
    /// How far a connected child block overlaps the socket vertically.
    pub tab_vertical_overlap: f32,
    pub tab_width: f32,

    pub notch_width: f32,
    pub notch_height: f32,
    /// Distance from the block's left edge to the previous/next notch.
    pub notch_offset_left: f32,

    pub min_block_width: f32,
    pub min_block_height: f32,
    pub empty_block_spacer_height: f32,

    pub dummy_input_min_height: f32,
    pub dummy_input_shadow_min_height: f32,

    pub corner_radius: f32,

    /// Distance from a statement input's left edge to its notch.
    pub statement_input_notch_offset: f32,
    pub statement_bottom_spacer: f32,
    pub statement_input_padding_left: f32,
    pub between_statement_padding_y: f32,

    pub top_row_min_height: f32,
    pub top_row_precedes_statement_min_height: f32,
    pub bottom_row_min_height: f32,
    pub bottom_row_after_statement_min_height: f32,

    /// Widest the bottom edge under an inline statement input may grow.
    pub max_bottom_width: f32,

    pub start_hat_height: f32,
    pub start_hat_width: f32,

    pub spacer_default_height: f32,

    pub empty_inline_input_padding: f32,
    pub empty_inline_input_height: f32,
    pub external_value_input_padding: f32,
    pub empty_statement_input_height: f32,

    pub jagged_teeth_height: f32,
    pub jagged_teeth_width: f32,

    pub field_text_font_size: f32,
    pub field_text_height: f32,
    pub field_text_font_family: String,
    pub field_text_font_weight: String,
    pub field_border_rect_height: f32,

    pub cursor_colour: Color,
    pub marker_colour: Color,
    pub insertion_marker_colour: Color,
    pub insertion_marker_opacity: f32,

    /// Whether blocks with neither output nor previous connection get hats
    /// by default. Themes may override through `start_hats`.
    pub add_start_hats: bool,
    pub full_block_fields: bool,

    /// Cap on dynamic connection shape widths; only consulted by renderers
    /// with dynamic shapes.
    pub max_dynamic_connection_shape_width: f32,

    pub(crate) variant: Variant,
    shapes: Option<ShapeSet>,
    block_styles: HashMap<String, ResolvedBlockStyle>,
}

impl Default for ConstantProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantProvider {
    /// A provider with the base renderer's values. Call [`Self::init`]
    /// before rendering.
    pub fn new() -> Self {
        let no_padding = 0.0;
        let small_padding = 3.0;
        let medium_padding = 5.0;
        let medium_large_padding = 8.0;
        let large_padding = 10.0;
        let tab_height = 15.0;
        let notch_offset_left = 15.0;
        let corner_radius = 8.0;
        let min_block_height = 24.0;

        Self {
            no_padding,
            small_padding,
            medium_padding,
            medium_large_padding,
            large_padding,
            tall_input_field_offset_y: medium_padding,
            tab_height,
            tab_offset_from_top: 5.0,
            tab_vertical_overlap: 2.5,
            tab_width: 8.0,
            notch_width: 15.0,
            notch_height: 4.0,
            notch_offset_left,
            min_block_width: 12.0,
            min_block_height,
            empty_block_spacer_height: 16.0,
            dummy_input_min_height: tab_height,
            dummy_input_shadow_min_height: tab_height,
            corner_radius,
            statement_input_notch_offset: notch_offset_left,
            statement_bottom_spacer: 0.0,
            statement_input_padding_left: 20.0,
            between_statement_padding_y: 4.0,
            top_row_min_height: medium_padding,
            top_row_precedes_statement_min_height: large_padding,
            bottom_row_min_height: medium_padding,
            bottom_row_after_statement_min_height: large_padding,
            max_bottom_width: 66.5,
            start_hat_height: 15.0,
            start_hat_width: 100.0,
            spacer_default_height: 15.0,
            empty_inline_input_padding: 14.5,
            empty_inline_input_height: tab_height + 11.0,
            external_value_input_padding: 2.0,
            empty_statement_input_height: min_block_height,
            jagged_teeth_height: 12.0,
            jagged_teeth_width: 6.0,
            field_text_font_size: 11.0,
            field_text_height: 13.0,
            field_text_font_family: "sans-serif".to_string(),
            field_text_font_weight: "normal".to_string(),
            field_border_rect_height: 16.0,
            cursor_colour: Color::new("#cc0a0a").expect("'#cc0a0a' is a valid CSS color"),
            marker_colour: Color::new("#4286f4").expect("'#4286f4' is a valid CSS color"),
            insertion_marker_colour: Color::black(),
            insertion_marker_opacity: 0.2,
            add_start_hats: false,
            full_block_fields: false,
            max_dynamic_connection_shape_width: 0.0,
            variant: Variant::Base,
            shapes: None,
            block_styles: HashMap::new(),
        }
    }

    pub(crate) fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// (Re)computes the derived shape set from the current constant values.
    /// Must run once after construction and again after any constant
    /// override.
    pub fn init(&mut self) {
        let shape_set = match self.variant {
            Variant::Base | Variant::Geras => ShapeSet {
                jagged_teeth: shapes::make_jagged_teeth(
                    self.jagged_teeth_width,
                    self.jagged_teeth_height,
                ),
                notch: std::rc::Rc::new(shapes::make_notch(self.notch_width, self.notch_height)),
                start_hat: shapes::make_start_hat(self.start_hat_width, self.start_hat_height),
                puzzle_tab: std::rc::Rc::new(shapes::make_puzzle_tab(
                    self.tab_width,
                    self.tab_height,
                )),
                inside_corners: shapes::make_inside_corners(self.corner_radius),
                outside_corners: shapes::make_outside_corners(self.corner_radius),
                hexagonal: None,
                rounded: None,
                squared: None,
            },
            Variant::Zelos => crate::zelos::build_shape_set(self),
        };
        if self.variant == Variant::Zelos {
            self.statement_input_notch_offset =
                self.notch_offset_left + shape_set.inside_corners.right_width;
        }
        self.shapes = Some(shape_set);
        debug!("shape set initialized");
    }

    /// The derived shape set, or an error before [`Self::init`] has run.
    pub fn shapes(&self) -> Result<&ShapeSet, RenderError> {
        self.shapes.as_ref().ok_or(RenderError::ShapesNotInitialized)
    }

    /// Maps a connection to the shape drawn for it.
    pub fn shape_for(
        &self,
        connection: &dyn ConnectionLike,
    ) -> Result<ConnectionShape, RenderError> {
        self.shape_for_with_hint(connection, None)
    }

    /// Like [`Self::shape_for`], with the measured block's output-shape hint
    /// for renderers that honor it.
    pub fn shape_for_with_hint(
        &self,
        connection: &dyn ConnectionLike,
        output_shape_hint: Option<i32>,
    ) -> Result<ConnectionShape, RenderError> {
        let shape_set = self.shapes()?;
        match self.variant {
            Variant::Base | Variant::Geras => Ok(match connection.kind() {
                ConnectionKind::InputValue | ConnectionKind::OutputValue => {
                    ConnectionShape::PuzzleTab(shape_set.puzzle_tab.clone())
                }
                ConnectionKind::PreviousStatement | ConnectionKind::NextStatement => {
                    ConnectionShape::Notch(shape_set.notch.clone())
                }
            }),
            Variant::Zelos => {
                crate::zelos::shape_for(shape_set, connection, output_shape_hint)
            }
        }
    }

    /// Re-derives theme-driven constants. Safe to call repeatedly; each call
    /// derives from the theme alone, nothing accumulates.
    pub fn set_theme(&mut self, theme: &Theme) -> Result<(), RenderError> {
        let mut resolved = HashMap::with_capacity(theme.block_styles.len());
        for (name, style) in &theme.block_styles {
            resolved.insert(name.clone(), self.resolve_block_style(style)?);
        }
        self.block_styles = resolved;

        if let Some(font) = &theme.font_style {
            if let Some(family) = &font.family {
                self.field_text_font_family = family.clone();
            }
            if let Some(weight) = &font.weight {
                self.field_text_font_weight = weight.clone();
            }
            if let Some(size) = font.size {
                self.field_text_font_size = size;
                // Headless line-height approximation; reproduces the
                // documented default of 13 at 11pt.
                self.field_text_height = (size * 1.2).round();
            }
        }

        let components = &theme.component_styles;
        if let Some(colour) = &components.cursor_colour {
            self.cursor_colour = Color::new(colour).map_err(RenderError::Theme)?;
        }
        if let Some(colour) = &components.marker_colour {
            self.marker_colour = Color::new(colour).map_err(RenderError::Theme)?;
        }
        if let Some(colour) = &components.insertion_marker_colour {
            self.insertion_marker_colour = Color::new(colour).map_err(RenderError::Theme)?;
        }
        if let Some(opacity) = components.insertion_marker_opacity {
            self.insertion_marker_opacity = opacity;
        }

        if let Some(start_hats) = theme.start_hats {
            self.add_start_hats = start_hats;
        }

        debug!(theme = theme.name.as_str(), styles = self.block_styles.len(); "theme applied");
        Ok(())
    }

    /// The resolved style registered under `name`, or the default style.
    pub fn block_style(&self, name: Option<&str>) -> ResolvedBlockStyle {
        name.and_then(|n| self.block_styles.get(n).cloned())
            .unwrap_or_else(|| self.derive_block_style(Color::black(), None))
    }

    /// A style derived from a bare colour, for blocks without a named style.
    pub fn block_style_for_colour(&self, colour: Color) -> ResolvedBlockStyle {
        self.derive_block_style(colour, None)
    }

    fn resolve_block_style(&self, style: &BlockStyle) -> Result<ResolvedBlockStyle, RenderError> {
        let primary = Color::new(&style.colour_primary).map_err(RenderError::Theme)?;
        let hat = match style.hat.as_deref() {
            Some("cap") => Some(HatStyle::Cap),
            _ => None,
        };
        let mut resolved = self.derive_block_style(primary, hat);
        if let Some(secondary) = &style.colour_secondary {
            resolved.colour_secondary = Color::new(secondary).map_err(RenderError::Theme)?;
        }
        if let Some(tertiary) = &style.colour_tertiary {
            resolved.colour_tertiary = Color::new(tertiary).map_err(RenderError::Theme)?;
        }
        Ok(resolved)
    }

    fn derive_block_style(&self, primary: Color, hat: Option<HatStyle>) -> ResolvedBlockStyle {
        let (colour_secondary, colour_tertiary) = match self.variant {
            // Flat renderers shade toward black; the base look tints toward
            // white.
            Variant::Zelos => (
                primary.blend(Color::black(), 0.15),
                primary.blend(Color::black(), 0.25),
            ),
            _ => (
                primary.blend(Color::white(), 0.6),
                primary.blend(Color::white(), 0.3),
            ),
        };
        ResolvedBlockStyle {
            colour_primary: primary,
            colour_secondary,
            colour_tertiary,
            hat,
        }
    }
}
