//! The external block model consumed by the layout engine.
//!
//! The measurement pass reads blocks, inputs, fields, icons and connections
//! through the traits in this module and never mutates them. The drawing
//! pass writes results back exactly once per render, through the `set_*`
//! methods; those take `&self`, so implementations store write-back slots
//! with interior mutability.
//!
//! [`simple`] provides an owned implementation of all five traits for hosts
//! that do not have their own block model, and for tests.

use crate::geometry::Size;

pub mod simple;

/// The four connection kinds a block part can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// A socket on an input, accepting a value block.
    InputValue,
    /// The plug on the left (or top-left) of a value block.
    OutputValue,
    /// The notch on top of a stack block.
    PreviousStatement,
    /// The notch under a stack block.
    NextStatement,
}

/// The four input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Holds a value connection.
    Value,
    /// Holds a statement connection; its child stack nests inside the block.
    Statement,
    /// Fields only, no connection.
    Dummy,
    /// Fields only; always the last input on its row.
    EndRow,
}

/// Horizontal alignment of a row's content within the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Centre,
    Right,
}

/// A block-level hat override. When absent, the renderer's start-hat policy
/// decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatStyle {
    /// Draw a rounded cap above the top row.
    Cap,
    /// Never draw a hat, regardless of renderer policy.
    Flat,
}

/// The path strings and flags recorded on a block at the end of a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPaths {
    /// The outer outline of the block.
    pub outline: String,
    /// Cutouts for inline inputs, drawn inside the outline.
    pub inline: String,
    /// True when the paths should be mirrored with `scale(-1 1)`.
    pub flipped_rtl: bool,
    /// Highlight fragments for highlighted connections.
    pub highlights: Vec<ConnectionHighlight>,
}

/// A highlight path for a single connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionHighlight {
    pub kind: ConnectionKind,
    pub path: String,
}

/// A connection point on a block or input.
pub trait ConnectionLike {
    /// Which kind of connection this is.
    fn kind(&self) -> ConnectionKind;

    /// Type checks attached to the connection, used by shape selection in
    /// renderers with per-type connection shapes. Empty means unchecked.
    fn checks(&self) -> &[String];

    /// Whether a block is attached.
    fn is_connected(&self) -> bool;

    /// The attached block, if any.
    fn target_block(&self) -> Option<&dyn BlockLike>;

    /// Whether the connection is currently highlighted.
    fn is_highlighted(&self) -> bool;

    /// Records the connection's final position relative to the block origin.
    /// Called exactly once per render, by the drawing pass.
    fn set_offset_in_block(&self, x: f32, y: f32);
}

/// A field on an input row. Layout treats fields as opaque leaves.
pub trait FieldLike {
    /// The size the field reports for itself.
    fn size(&self) -> Size;

    /// Editable fields get different padding than labels.
    fn is_editable(&self) -> bool;

    /// Whether the field mirrors its own content in RTL mode.
    fn flip_rtl(&self) -> bool;

    /// Records the field's final position relative to the block origin.
    fn set_position(&self, x: f32, y: f32);

    /// Shows or hides the field (hidden on insertion markers).
    fn set_visible(&self, visible: bool);
}

/// An icon attached to a block (mutator, comment, warning and the like).
pub trait IconLike {
    /// The size the icon reports for itself.
    fn size(&self) -> Size;

    /// Whether the icon disappears when the block is collapsed.
    fn collapse_hidden(&self) -> bool;

    /// Records the icon's final position relative to the block origin.
    fn set_position(&self, x: f32, y: f32);

    /// Shows or hides the icon (hidden on insertion markers).
    fn set_visible(&self, visible: bool);
}

/// One input on a block: an ordered run of fields plus an optional
/// connection.
pub trait InputLike {
    fn kind(&self) -> InputKind;

    /// Alignment of the row this input ends up on.
    fn align(&self) -> Align;

    /// The fields on this input, in order.
    fn fields(&self) -> Vec<&dyn FieldLike>;

    /// The input's connection. Present on value and statement inputs.
    fn connection(&self) -> Option<&dyn ConnectionLike>;

    /// The block attached to this input's connection, if any.
    fn connected_block(&self) -> Option<&dyn BlockLike>;
}

/// A block, as seen by the layout engine.
pub trait BlockLike {
    /// The block's inputs, in order. Hidden inputs are simply omitted.
    fn inputs(&self) -> Vec<&dyn InputLike>;

    /// Icons, which always attach to the first row.
    fn icons(&self) -> Vec<&dyn IconLike>;

    fn output_connection(&self) -> Option<&dyn ConnectionLike>;
    fn previous_connection(&self) -> Option<&dyn ConnectionLike>;
    fn next_connection(&self) -> Option<&dyn ConnectionLike>;

    /// Whether value inputs render inline rather than as external sockets.
    fn inputs_inline(&self) -> bool;

    fn is_collapsed(&self) -> bool;

    /// Shadow blocks are placeholder defaults; some minimum heights differ.
    fn is_shadow(&self) -> bool;

    /// Insertion markers render with fields and icons hidden.
    fn is_insertion_marker(&self) -> bool;

    /// Right-to-left layout mode.
    fn rtl(&self) -> bool;

    /// Block-level hat override, if any.
    fn hat(&self) -> Option<HatStyle>;

    /// A renderer-specific hint forcing the output connection shape.
    fn output_shape(&self) -> Option<i32>;

    /// The block's most recently rendered size, including any stack attached
    /// below it. Children report through this before the parent measures.
    fn height_width(&self) -> Size;

    /// True when the previous connection is attached to the next connection
    /// of a block above (as opposed to hanging free or nesting in a
    /// statement input). Such blocks square off their top-left corner.
    fn follows_stack(&self) -> bool;

    /// Records the rendered size. `width_with_children` includes attached
    /// child blocks; `childless_width` is the block body alone.
    fn set_rendered_size(&self, height: f32, width_with_children: f32, childless_width: f32);

    /// Records the final path strings. Called exactly once per render.
    fn set_paths(&self, paths: BlockPaths);
}
