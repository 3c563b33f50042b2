use std::collections::{HashMap, HashSet};

use super::scale;

/// Row of the entity table, as handed over by the data loader.
#[derive(Clone, Debug)]
pub struct ShowRecord {
	pub name: String,
	pub genre: String,
	pub description: String,
	pub cast: Option<String>,
}

/// Row of the relationship table: a show name and the cast id it links to.
#[derive(Clone, Debug)]
pub struct LinkRecord {
	pub source: String,
	pub target: String,
}

/// Discriminates the two node namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Show,
	Cast,
}

/// Identifier-based node handle: id plus namespace. Interaction state holds
/// these instead of indices or references, so equality survives cloning and
/// a show and a cast member may share a name without colliding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
	pub kind: NodeKind,
	pub id: String,
}

/// Variant payload of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
	Show {
		genre: String,
		description: String,
		cast: Option<String>,
	},
	Cast {
		/// Show names this cast member is linked to, in record order,
		/// duplicates preserved.
		shows: Vec<String>,
	},
}

/// A graph node. Coordinates and velocities belong to the simulation;
/// `fx`/`fy` pin the node while a drag is active.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub data: NodeData,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl Node {
	/// Node at the origin with no motion; the canvas seeds real positions.
	pub(super) fn new(id: String, data: NodeData) -> Self {
		Self {
			id,
			data,
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}

	pub fn kind(&self) -> NodeKind {
		match self.data {
			NodeData::Show { .. } => NodeKind::Show,
			NodeData::Cast { .. } => NodeKind::Cast,
		}
	}

	pub fn key(&self) -> NodeKey {
		NodeKey {
			kind: self.kind(),
			id: self.id.clone(),
		}
	}
}

/// A resolved relationship, as indices into [`GraphModel::nodes`]. `source`
/// always points at a show node and `target` at a cast node; both are
/// resolved at build time, never left dangling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

/// The session's graph: built once, structurally immutable afterwards
/// (the simulation only moves coordinates).
#[derive(Clone, Debug)]
pub struct GraphModel {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
	index: HashMap<NodeKey, usize>,
}

impl GraphModel {
	pub(super) fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.key(), i))
			.collect();
		Self { nodes, links, index }
	}

	pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
		self.index.get(key).copied()
	}

	/// Marker radius for a node kind.
	pub fn radius_of(&self, kind: NodeKind) -> f64 {
		scale::radius_of(kind)
	}

	/// Fill accent for a node kind.
	pub fn color_of(&self, kind: NodeKind) -> &'static str {
		scale::color_of(kind)
	}

	/// Indices of every node a link connects to `idx`.
	pub fn neighbors_of(&self, idx: usize) -> HashSet<usize> {
		let mut neighbors = HashSet::new();
		for link in &self.links {
			if link.source == idx {
				neighbors.insert(link.target);
			} else if link.target == idx {
				neighbors.insert(link.source);
			}
		}
		neighbors
	}

	/// Every display name/id, sorted case-insensitively. Handed to the
	/// autocomplete datalist once per session.
	pub fn search_options(&self) -> Vec<String> {
		let mut names: Vec<String> = self.nodes.iter().map(|n| n.id.clone()).collect();
		names.sort_by_key(|name| name.to_lowercase());
		names
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model() -> GraphModel {
		let nodes = vec![
			Node::new(
				"ShowA".into(),
				NodeData::Show {
					genre: "Drama".into(),
					description: "D".into(),
					cast: None,
				},
			),
			Node::new("alex".into(), NodeData::Cast { shows: vec!["ShowA".into()] }),
			Node::new("Bea".into(), NodeData::Cast { shows: vec![] }),
		];
		let links = vec![Link { source: 0, target: 1 }];
		GraphModel::new(nodes, links)
	}

	#[test]
	fn keys_compare_by_id_and_kind() {
		let show = NodeKey { kind: NodeKind::Show, id: "Alex".into() };
		let cast = NodeKey { kind: NodeKind::Cast, id: "Alex".into() };
		assert_ne!(show, cast);
		assert_eq!(show, show.clone());
	}

	#[test]
	fn index_lookup_distinguishes_namespaces() {
		let m = model();
		let key = NodeKey { kind: NodeKind::Cast, id: "alex".into() };
		assert_eq!(m.index_of(&key), Some(1));
		let wrong_kind = NodeKey { kind: NodeKind::Show, id: "alex".into() };
		assert_eq!(m.index_of(&wrong_kind), None);
	}

	#[test]
	fn neighbors_follow_links_both_ways() {
		let m = model();
		assert_eq!(m.neighbors_of(0), HashSet::from([1]));
		assert_eq!(m.neighbors_of(1), HashSet::from([0]));
		assert!(m.neighbors_of(2).is_empty());
	}

	#[test]
	fn search_options_sorted_case_insensitively() {
		let m = model();
		assert_eq!(m.search_options(), vec!["alex", "Bea", "ShowA"]);
	}

	#[test]
	fn presentation_scales_per_kind() {
		let m = model();
		assert_eq!(m.radius_of(NodeKind::Show), 9.0);
		assert_eq!(m.radius_of(NodeKind::Cast), 5.0);
		assert_ne!(m.color_of(NodeKind::Show), m.color_of(NodeKind::Cast));
	}
}
