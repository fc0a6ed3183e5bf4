//! In-memory scene adapter.
//!
//! Records every node a floor creates so callers can inspect the result
//! without a rendering backend. Terminal frontends rasterize from it.

use std::collections::BTreeMap;

use crate::env::FrameRect;

use super::{NodeId, SceneGraph, TextRenderer, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Container { name: String, z_index: i32 },
    Sprite { texture: String, frame: FrameRect, label: String },
    Text { text: String, style: TextStyle },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub anchor: (f32, f32),
    pub position: (f32, f32),
    pub scale: f32,
}

impl RecordedNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            anchor: (0.0, 0.0),
            position: (0.0, 0.0),
            scale: 1.0,
        }
    }
}

/// Scene graph that keeps nodes in a map instead of drawing them.
#[derive(Clone, Debug)]
pub struct RecordingScene {
    nodes: BTreeMap<NodeId, RecordedNode>,
    next_id: u64,
    root: NodeId,
}

impl RecordingScene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            RecordedNode::new(NodeKind::Container {
                name: "map".to_owned(),
                z_index: 0,
            }),
        );

        Self {
            nodes,
            next_id: 1,
            root,
        }
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, RecordedNode::new(kind));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RecordedNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn sprites(&self) -> impl Iterator<Item = (NodeId, &RecordedNode)> {
        self.nodes()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Sprite { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = (NodeId, &RecordedNode)> {
        self.nodes()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Text { .. }))
    }

    /// Finds a container by name.
    pub fn container(&self, name: &str) -> Option<NodeId> {
        self.nodes().find_map(|(id, node)| match &node.kind {
            NodeKind::Container { name: n, .. } if n == name => Some(id),
            _ => None,
        })
    }

    /// Nearest container ancestor's z-index, used to order drawing.
    pub fn z_index_of(&self, id: NodeId) -> i32 {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                break;
            };
            if let NodeKind::Container { z_index, .. } = node.kind {
                return z_index;
            }
            current = node.parent;
        }
        0
    }
}

impl Default for RecordingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for RecordingScene {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_container(&mut self, name: &str, z_index: i32) -> NodeId {
        self.insert(NodeKind::Container {
            name: name.to_owned(),
            z_index,
        })
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(&parent) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        } else {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn destroy(&mut self, node: NodeId, recursive: bool) {
        let Some(removed) = self.nodes.remove(&node) else {
            return;
        };

        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != node);
        }

        for child in removed.children {
            if recursive {
                self.destroy(child, true);
            } else if let Some(orphan) = self.nodes.get_mut(&child) {
                orphan.parent = None;
            }
        }
    }

    fn create_sprite(&mut self, texture: &str, frame: FrameRect, label: &str) -> NodeId {
        self.insert(NodeKind::Sprite {
            texture: texture.to_owned(),
            frame,
            label: label.to_owned(),
        })
    }

    fn set_anchor(&mut self, node: NodeId, x: f32, y: f32) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.anchor = (x, y);
        }
    }

    fn set_position(&mut self, node: NodeId, x: f32, y: f32) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.position = (x, y);
        }
    }

    fn set_scale(&mut self, node: NodeId, scale: f32) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.scale = scale;
        }
    }
}

impl TextRenderer for RecordingScene {
    fn create_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> NodeId {
        let id = self.insert(NodeKind::Text {
            text: text.to_owned(),
            style: style.clone(),
        });
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = (x, y);
            node.anchor = style.anchor;
        }
        id
    }
}
