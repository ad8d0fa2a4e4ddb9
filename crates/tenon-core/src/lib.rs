//! Tenon Core Types and Definitions
//!
//! This crate provides the foundational types for the Tenon block-rendering
//! pipeline. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Model**: The external block/input/field/connection traits the layout
//!   engine consumes, plus a simple owned implementation ([`model`] module)
//! - **Theme**: Serializable theme data consumed by constant providers
//!   ([`theme`] module)

pub mod color;
pub mod geometry;
pub mod model;
pub mod theme;
