//! Focus/selection state machine and the style projection derived from it.

use std::collections::HashSet;

use log::debug;

use super::types::{GraphModel, Link, Node, NodeData, NodeKey};

/// Opacity of nodes and links outside the relevant neighborhood.
pub const DIMMED_OPACITY: f64 = 0.1;

/// Semantic input events, already resolved to node identity by the canvas
/// layer.
#[derive(Clone, Debug)]
pub enum InputEvent {
	PointerEnter(NodeKey),
	PointerLeave(NodeKey),
	NodeClick(NodeKey),
	BackgroundClick,
	SearchChange(String),
}

/// The focus state machine. One value, threaded through the controller;
/// there is no ambient "is something locked" flag anywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionState {
	/// No focus; everything at full weight, panel hidden.
	Idle,
	/// Pointer resting on a node; reverts on leave unless locked first.
	HoverPreview(NodeKey),
	/// Click-locked focus; survives pointer-leave, cleared only by a
	/// background click or a new search.
	LockedSelection(NodeKey),
	/// Live text query. Empty `matches` is the search-miss state: full
	/// weight restored, panel hidden, no stale focus.
	SearchFilter {
		query: String,
		matches: Vec<NodeKey>,
	},
}

impl InteractionState {
	/// Applies one event and returns the next state. Pure: style updates are
	/// derived separately via [`Highlight::of`].
	pub fn apply(&self, event: &InputEvent, model: &GraphModel) -> InteractionState {
		match event {
			InputEvent::PointerEnter(key) => match self {
				InteractionState::LockedSelection(_) => self.clone(),
				_ => InteractionState::HoverPreview(key.clone()),
			},
			InputEvent::PointerLeave(key) => match self {
				InteractionState::HoverPreview(current) if current == key => {
					InteractionState::Idle
				}
				other => other.clone(),
			},
			InputEvent::NodeClick(key) => InteractionState::LockedSelection(key.clone()),
			InputEvent::BackgroundClick => InteractionState::Idle,
			InputEvent::SearchChange(query) => {
				if query.is_empty() {
					return InteractionState::Idle;
				}
				let matches = search_matches(model, query);
				debug!("search {query:?}: {} match(es)", matches.len());
				InteractionState::SearchFilter {
					query: query.clone(),
					matches,
				}
			}
		}
	}
}

/// Case-insensitive prefix match over display names (node ids), in node
/// order.
fn search_matches(model: &GraphModel, query: &str) -> Vec<NodeKey> {
	let query = query.to_lowercase();
	model
		.nodes
		.iter()
		.filter(|node| node.id.to_lowercase().starts_with(&query))
		.map(Node::key)
		.collect()
}

/// What the side panel displays for a focused entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelContent {
	Show {
		name: String,
		cast: String,
		genre: String,
		description: String,
	},
	Cast {
		id: String,
		shows: Vec<String>,
	},
}

impl PanelContent {
	fn of(node: &Node) -> Self {
		match &node.data {
			NodeData::Show {
				genre,
				description,
				cast,
			} => PanelContent::Show {
				name: node.id.clone(),
				cast: match cast {
					Some(c) if !c.is_empty() => c.clone(),
					_ => "None".to_string(),
				},
				genre: genre.clone(),
				description: description.clone(),
			},
			NodeData::Cast { shows } => PanelContent::Cast {
				id: node.id.clone(),
				shows: shows.clone(),
			},
		}
	}
}

/// Style projection of an interaction state: the focus set, the relevant
/// neighborhood, and the panel. Rebuilt whole on every state change, never
/// accumulated incrementally across focus changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	focus: HashSet<usize>,
	relevant: HashSet<usize>,
	pub panel: Option<PanelContent>,
}

impl Highlight {
	pub fn of(state: &InteractionState, model: &GraphModel) -> Self {
		let focus_keys: Vec<&NodeKey> = match state {
			InteractionState::Idle => Vec::new(),
			InteractionState::HoverPreview(key) | InteractionState::LockedSelection(key) => {
				vec![key]
			}
			InteractionState::SearchFilter { matches, .. } => matches.iter().collect(),
		};

		let mut focus = HashSet::new();
		let mut relevant = HashSet::new();
		let mut panel = None;
		for key in focus_keys {
			let Some(idx) = model.index_of(key) else {
				continue;
			};
			focus.insert(idx);
			relevant.insert(idx);
			relevant.extend(model.neighbors_of(idx));
			// Last processed focus member wins the panel.
			panel = Some(PanelContent::of(&model.nodes[idx]));
		}
		Self {
			focus,
			relevant,
			panel,
		}
	}

	/// Whether any focus exists; without one nothing is dimmed.
	pub fn has_focus(&self) -> bool {
		!self.focus.is_empty()
	}

	pub fn node_opacity(&self, idx: usize) -> f64 {
		if !self.has_focus() || self.relevant.contains(&idx) {
			1.0
		} else {
			DIMMED_OPACITY
		}
	}

	/// Relevant nodes carry the distinguishing stroke.
	pub fn node_stroke(&self, idx: usize) -> bool {
		self.has_focus() && self.relevant.contains(&idx)
	}

	/// Labels show for focus members only, never for a node that is merely
	/// relevant through a link.
	pub fn label_visible(&self, idx: usize) -> bool {
		self.focus.contains(&idx)
	}

	/// A link renders at full weight iff incident to a focus member.
	pub fn link_opacity(&self, link: &Link) -> f64 {
		if !self.has_focus()
			|| self.focus.contains(&link.source)
			|| self.focus.contains(&link.target)
		{
			1.0
		} else {
			DIMMED_OPACITY
		}
	}
}
