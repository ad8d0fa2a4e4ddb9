//! An owned implementation of the block model traits.
//!
//! Hosts with their own block data structures implement the traits in
//! [`crate::model`] directly; this module is for everyone else. Blocks are
//! built with chainable constructors and own their children through their
//! connections, so a whole tree can be rendered bottom-up from one value.
//!
//! ```
//! use tenon_core::model::simple::{Block, Field, Input};
//!
//! let block = Block::new()
//!     .with_previous()
//!     .with_next()
//!     .with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
//! ```

use std::cell::{Cell, RefCell};

use crate::geometry::{Point, Size};
use crate::model::{
    Align, BlockLike, BlockPaths, ConnectionKind, ConnectionLike, FieldLike, HatStyle, IconLike,
    InputKind, InputLike,
};

/// An owned connection, optionally owning its attached child block.
#[derive(Debug, Default)]
pub struct Connection {
    kind: Option<ConnectionKind>,
    checks: Vec<String>,
    target: Option<Box<Block>>,
    highlighted: Cell<bool>,
    offset: Cell<Point>,
}

impl Connection {
    pub fn new(kind: ConnectionKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Adds type checks, consumed by shape selection.
    pub fn with_checks(mut self, checks: Vec<String>) -> Self {
        self.checks = checks;
        self
    }

    /// Attaches a child block.
    pub fn with_target(mut self, target: Block) -> Self {
        self.target = Some(Box::new(target));
        self
    }

    pub fn set_highlighted(&self, highlighted: bool) {
        self.highlighted.set(highlighted);
    }

    /// The offset recorded by the last render.
    pub fn offset(&self) -> Point {
        self.offset.get()
    }

    /// The attached child block, if any.
    pub fn target(&self) -> Option<&Block> {
        self.target.as_deref()
    }

    fn kind_or_default(&self) -> ConnectionKind {
        self.kind.unwrap_or(ConnectionKind::InputValue)
    }
}

impl ConnectionLike for Connection {
    fn kind(&self) -> ConnectionKind {
        self.kind_or_default()
    }

    fn checks(&self) -> &[String] {
        &self.checks
    }

    fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    fn target_block(&self) -> Option<&dyn BlockLike> {
        self.target.as_deref().map(|b| b as &dyn BlockLike)
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted.get()
    }

    fn set_offset_in_block(&self, x: f32, y: f32) {
        self.offset.set(Point::new(x, y));
    }
}

/// An owned field with a fixed reported size.
#[derive(Debug)]
pub struct Field {
    size: Size,
    editable: bool,
    flip_rtl: bool,
    position: Cell<Point>,
    visible: Cell<bool>,
}

impl Field {
    /// A non-editable label field.
    pub fn label(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            editable: false,
            flip_rtl: false,
            position: Cell::new(Point::default()),
            visible: Cell::new(true),
        }
    }

    /// An editable field (text input, dropdown and the like).
    pub fn editable(width: f32, height: f32) -> Self {
        Self {
            editable: true,
            ..Self::label(width, height)
        }
    }

    /// Marks the field as mirroring its own content in RTL mode.
    pub fn with_flip_rtl(mut self) -> Self {
        self.flip_rtl = true;
        self
    }

    /// The position recorded by the last render.
    pub fn position(&self) -> Point {
        self.position.get()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl FieldLike for Field {
    fn size(&self) -> Size {
        self.size
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn flip_rtl(&self) -> bool {
        self.flip_rtl
    }

    fn set_position(&self, x: f32, y: f32) {
        self.position.set(Point::new(x, y));
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

/// An owned icon with a fixed reported size.
#[derive(Debug)]
pub struct Icon {
    size: Size,
    collapse_hidden: bool,
    position: Cell<Point>,
    visible: Cell<bool>,
}

impl Icon {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            collapse_hidden: false,
            position: Cell::new(Point::default()),
            visible: Cell::new(true),
        }
    }

    /// Hides the icon while the block is collapsed.
    pub fn with_collapse_hidden(mut self) -> Self {
        self.collapse_hidden = true;
        self
    }

    pub fn position(&self) -> Point {
        self.position.get()
    }
}

impl IconLike for Icon {
    fn size(&self) -> Size {
        self.size
    }

    fn collapse_hidden(&self) -> bool {
        self.collapse_hidden
    }

    fn set_position(&self, x: f32, y: f32) {
        self.position.set(Point::new(x, y));
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

/// An owned input: fields plus an optional connection.
#[derive(Debug)]
pub struct Input {
    kind: InputKind,
    align: Align,
    fields: Vec<Field>,
    connection: Option<Connection>,
}

impl Input {
    pub fn dummy() -> Self {
        Self {
            kind: InputKind::Dummy,
            align: Align::Left,
            fields: Vec::new(),
            connection: None,
        }
    }

    pub fn end_row() -> Self {
        Self {
            kind: InputKind::EndRow,
            ..Self::dummy()
        }
    }

    /// A value input with an unconnected socket.
    pub fn value() -> Self {
        Self {
            kind: InputKind::Value,
            connection: Some(Connection::new(ConnectionKind::InputValue)),
            ..Self::dummy()
        }
    }

    /// A statement input with an unconnected notch.
    pub fn statement() -> Self {
        Self {
            kind: InputKind::Statement,
            connection: Some(Connection::new(ConnectionKind::NextStatement)),
            ..Self::dummy()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Replaces the input's connection, keeping its kind consistent with the
    /// input kind chosen at construction.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Attaches a child block to the input's connection.
    pub fn with_child(mut self, child: Block) -> Self {
        let kind = match self.kind {
            InputKind::Statement => ConnectionKind::NextStatement,
            _ => ConnectionKind::InputValue,
        };
        let connection = self.connection.take().unwrap_or_else(|| Connection::new(kind));
        self.connection = Some(connection.with_target(child));
        self
    }

    /// The input's connection, concretely typed.
    pub fn connection_ref(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// The input's fields, concretely typed.
    pub fn field_refs(&self) -> &[Field] {
        &self.fields
    }
}

impl InputLike for Input {
    fn kind(&self) -> InputKind {
        self.kind
    }

    fn align(&self) -> Align {
        self.align
    }

    fn fields(&self) -> Vec<&dyn FieldLike> {
        self.fields.iter().map(|f| f as &dyn FieldLike).collect()
    }

    fn connection(&self) -> Option<&dyn ConnectionLike> {
        self.connection.as_ref().map(|c| c as &dyn ConnectionLike)
    }

    fn connected_block(&self) -> Option<&dyn BlockLike> {
        self.connection.as_ref().and_then(|c| c.target_block())
    }
}

/// An owned block.
#[derive(Debug, Default)]
pub struct Block {
    inputs: Vec<Input>,
    icons: Vec<Icon>,
    output: Option<Connection>,
    previous: Option<Connection>,
    next: Option<Connection>,
    inputs_inline: bool,
    collapsed: bool,
    shadow: bool,
    insertion_marker: bool,
    rtl: bool,
    hat: Option<HatStyle>,
    output_shape: Option<i32>,
    follows_stack: bool,
    height_width: Cell<Size>,
    childless_width: Cell<f32>,
    paths: RefCell<Option<BlockPaths>>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icons.push(icon);
        self
    }

    pub fn with_output(mut self) -> Self {
        self.output = Some(Connection::new(ConnectionKind::OutputValue));
        self
    }

    pub fn with_output_checks(mut self, checks: Vec<String>) -> Self {
        self.output = Some(Connection::new(ConnectionKind::OutputValue).with_checks(checks));
        self
    }

    pub fn with_previous(mut self) -> Self {
        self.previous = Some(Connection::new(ConnectionKind::PreviousStatement));
        self
    }

    pub fn with_next(mut self) -> Self {
        self.next = Some(Connection::new(ConnectionKind::NextStatement));
        self
    }

    /// Attaches a following block to the next connection.
    pub fn with_next_block(mut self, mut block: Block) -> Self {
        block.follows_stack = true;
        self.next = Some(Connection::new(ConnectionKind::NextStatement).with_target(block));
        self
    }

    pub fn with_inline_inputs(mut self) -> Self {
        self.inputs_inline = true;
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    pub fn shadow(mut self) -> Self {
        self.shadow = true;
        self
    }

    pub fn insertion_marker(mut self) -> Self {
        self.insertion_marker = true;
        self
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn with_hat(mut self, hat: HatStyle) -> Self {
        self.hat = Some(hat);
        self
    }

    pub fn with_output_shape(mut self, shape: i32) -> Self {
        self.output_shape = Some(shape);
        self
    }

    /// Seeds the size the block reports before its first render. Useful for
    /// child blocks in tests and for hosts that cache sizes externally.
    pub fn with_reported_size(self, width: f32, height: f32) -> Self {
        self.height_width.set(Size::new(width, height));
        self
    }

    /// The path strings recorded by the last render, if any.
    pub fn paths(&self) -> Option<BlockPaths> {
        self.paths.borrow().clone()
    }

    /// The block-body width recorded by the last render.
    pub fn childless_width(&self) -> f32 {
        self.childless_width.get()
    }

    /// The output connection, concretely typed.
    pub fn output_ref(&self) -> Option<&Connection> {
        self.output.as_ref()
    }

    /// The previous connection, concretely typed.
    pub fn previous_ref(&self) -> Option<&Connection> {
        self.previous.as_ref()
    }

    /// The next connection, concretely typed.
    pub fn next_ref(&self) -> Option<&Connection> {
        self.next.as_ref()
    }

    /// The inputs, concretely typed.
    pub fn input_refs(&self) -> &[Input] {
        &self.inputs
    }
}

impl BlockLike for Block {
    fn inputs(&self) -> Vec<&dyn InputLike> {
        self.inputs.iter().map(|i| i as &dyn InputLike).collect()
    }

    fn icons(&self) -> Vec<&dyn IconLike> {
        self.icons.iter().map(|i| i as &dyn IconLike).collect()
    }

    fn output_connection(&self) -> Option<&dyn ConnectionLike> {
        self.output.as_ref().map(|c| c as &dyn ConnectionLike)
    }

    fn previous_connection(&self) -> Option<&dyn ConnectionLike> {
        self.previous.as_ref().map(|c| c as &dyn ConnectionLike)
    }

    fn next_connection(&self) -> Option<&dyn ConnectionLike> {
        self.next.as_ref().map(|c| c as &dyn ConnectionLike)
    }

    fn inputs_inline(&self) -> bool {
        self.inputs_inline
    }

    fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    fn is_shadow(&self) -> bool {
        self.shadow
    }

    fn is_insertion_marker(&self) -> bool {
        self.insertion_marker
    }

    fn rtl(&self) -> bool {
        self.rtl
    }

    fn hat(&self) -> Option<HatStyle> {
        self.hat
    }

    fn output_shape(&self) -> Option<i32> {
        self.output_shape
    }

    fn height_width(&self) -> Size {
        self.height_width.get()
    }

    fn follows_stack(&self) -> bool {
        self.follows_stack
    }

    fn set_rendered_size(&self, height: f32, width_with_children: f32, childless_width: f32) {
        self.height_width.set(Size::new(width_with_children, height));
        self.childless_width.set(childless_width);
    }

    fn set_paths(&self, paths: BlockPaths) {
        *self.paths.borrow_mut() = Some(paths);
    }
}
