//! Rendering adapter contract.
//!
//! Floors never rasterize anything. They describe what to show through a
//! [`SceneGraph`] (containers and sprites) and a [`TextRenderer`] (damage
//! labels); a frontend implements both for its backend. [`recording`] holds an
//! in-memory implementation for headless use and tests.

pub mod recording;
mod view;

pub use view::Viewport;

use std::fmt;

use crate::env::FrameRect;

/// Opaque handle to a node created by a scene adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Minimal 2D scene graph a floor draws into.
pub trait SceneGraph {
    /// Container all floor content is attached to.
    fn root(&self) -> NodeId;

    fn create_container(&mut self, name: &str, z_index: i32) -> NodeId;

    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Destroys a node; with `recursive` its children go too.
    fn destroy(&mut self, node: NodeId, recursive: bool);

    /// Creates a sprite showing `frame` of `texture`. `label` is a debug name.
    fn create_sprite(&mut self, texture: &str, frame: FrameRect, label: &str) -> NodeId;

    fn set_anchor(&mut self, node: NodeId, x: f32, y: f32);

    fn set_position(&mut self, node: NodeId, x: f32, y: f32);

    fn set_scale(&mut self, node: NodeId, scale: f32);
}

/// Styling of a text node.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_thickness: f32,
    pub anchor: (f32, f32),
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            font_family: "Arial".to_owned(),
            fill: "#ffffff".to_owned(),
            stroke: "#000000".to_owned(),
            stroke_thickness: 2.0,
            anchor: (0.0, 0.0),
        }
    }
}

/// Creates styled text nodes.
pub trait TextRenderer {
    fn create_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> NodeId;
}
