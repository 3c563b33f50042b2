use std::f64::consts::PI;

use super::interaction::{Highlight, InputEvent, InteractionState};
use super::simulation::Simulation;
use super::types::{GraphModel, NodeKey};

/// Extra pointer slack around a marker when hit-testing, in world units.
const HIT_PADDING: f64 = 4.0;
/// Pointer travel at or below this is a click, not a drag (screen px).
const CLICK_TOLERANCE: f64 = 3.0;
/// Zoom scale bounds.
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 2.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	/// Farthest screen-space travel from the press point, for click
	/// discrimination.
	pub moved: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything one canvas session owns: the static model, the layout engine,
/// the focus state machine with its current style projection, and the view
/// transform with drag/pan bookkeeping. All raw pointer input funnels
/// through here and comes out as semantic [`InputEvent`]s.
pub struct GraphState {
	pub model: GraphModel,
	pub simulation: Simulation,
	pub interaction: InteractionState,
	pub highlight: Highlight,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl GraphState {
	pub fn new(mut model: GraphModel, width: f64, height: f64) -> Self {
		// Seed positions on a ring around the canvas center.
		let n = model.nodes.len().max(1);
		for (i, node) in model.nodes.iter_mut().enumerate() {
			let angle = (i as f64) * 2.0 * PI / n as f64;
			node.x = width / 2.0 + 100.0 * angle.cos();
			node.y = height / 2.0 + 100.0 * angle.sin();
		}
		let simulation =
			Simulation::new(model.nodes.len(), &model.links, width / 2.0, height / 2.0);
		Self {
			model,
			simulation,
			interaction: InteractionState::Idle,
			highlight: Highlight::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
		}
	}

	/// One animation-frame step. Returns whether the layout still moved.
	pub fn tick(&mut self) -> bool {
		self.simulation.tick(&mut self.model.nodes, &self.model.links)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (idx, node) in self.model.nodes.iter().enumerate() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			// Hit radius is in world-space, scales with zoom like markers.
			let hit = self.model.radius_of(node.kind()) + HIT_PADDING;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(idx);
			}
		}
		found
	}

	/// Runs one semantic event through the state machine and refreshes the
	/// style projection.
	pub fn apply_event(&mut self, event: InputEvent) {
		self.interaction = self.interaction.apply(&event, &self.model);
		self.highlight = Highlight::of(&self.interaction, &self.model);
	}

	fn key_of(&self, idx: usize) -> NodeKey {
		self.model.nodes[idx].key()
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				active: true,
				node: Some(idx),
				start_x: sx,
				start_y: sy,
				moved: 0.0,
			};
			self.simulation.drag_started();
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		// Hover resolution is suppressed while a node drag is active.
		if !self.drag.active {
			let over = self.node_at_position(sx, sy);
			if over != self.hovered {
				if let Some(prev) = self.hovered {
					let key = self.key_of(prev);
					self.apply_event(InputEvent::PointerLeave(key));
				}
				if let Some(idx) = over {
					let key = self.key_of(idx);
					self.apply_event(InputEvent::PointerEnter(key));
				}
				self.hovered = over;
			}
		}

		if self.drag.active {
			let travel = ((sx - self.drag.start_x).powi(2)
				+ (sy - self.drag.start_y).powi(2))
			.sqrt();
			if travel > self.drag.moved {
				self.drag.moved = travel;
			}
			if let Some(idx) = self.drag.node {
				let (gx, gy) = self.screen_to_graph(sx, sy);
				let node = &mut self.model.nodes[idx];
				node.fx = Some(gx);
				node.fy = Some(gy);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends a press. Returns true when the press resolved to a click (node
	/// or background) so the host can clear the search box.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> bool {
		if self.drag.active {
			let clicked = self.drag.moved <= CLICK_TOLERANCE;
			if let Some(idx) = self.drag.node {
				// Pins are cleared exactly when the drag ends.
				let node = &mut self.model.nodes[idx];
				node.fx = None;
				node.fy = None;
				if clicked {
					let key = self.key_of(idx);
					self.apply_event(InputEvent::NodeClick(key));
				}
			}
			self.simulation.drag_ended();
			self.drag = DragState::default();
			return clicked;
		}
		if self.pan.active {
			let travel =
				((sx - self.pan.start_x).powi(2) + (sy - self.pan.start_y).powi(2)).sqrt();
			self.pan = PanState::default();
			if travel <= CLICK_TOLERANCE {
				self.apply_event(InputEvent::BackgroundClick);
				return true;
			}
		}
		false
	}

	/// Canvas mouseleave: abandon any press and drop the hover.
	pub fn pointer_left(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node {
				let node = &mut self.model.nodes[idx];
				node.fx = None;
				node.fy = None;
			}
			self.simulation.drag_ended();
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		if let Some(prev) = self.hovered.take() {
			let key = self.key_of(prev);
			self.apply_event(InputEvent::PointerLeave(key));
		}
	}

	/// Wheel zoom anchored at the pointer, clamped to the scale bounds.
	pub fn zoom(&mut self, factor: f64, sx: f64, sy: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.recenter(width / 2.0, height / 2.0);
	}
}

#[cfg(test)]
mod tests {
	use super::super::builder::build_graph;
	use super::super::types::{LinkRecord, NodeKind, ShowRecord};
	use super::*;

	fn state() -> GraphState {
		let shows: Vec<ShowRecord> = ["ShowA", "ShowB"]
			.iter()
			.map(|name| ShowRecord {
				name: (*name).into(),
				genre: "Drama".into(),
				description: "Plot".into(),
				cast: None,
			})
			.collect();
		let links = vec![
			LinkRecord { source: "ShowA".into(), target: "Actor1".into() },
			LinkRecord { source: "ShowB".into(), target: "Actor1".into() },
		];
		let model = build_graph(&shows, &links).unwrap();
		GraphState::new(model, 800.0, 600.0)
	}

	/// Screen position of a node under the current transform.
	fn screen_pos(s: &GraphState, idx: usize) -> (f64, f64) {
		let node = &s.model.nodes[idx];
		(
			node.x * s.transform.k + s.transform.x,
			node.y * s.transform.k + s.transform.y,
		)
	}

	#[test]
	fn nodes_seeded_on_a_ring_around_center() {
		let s = state();
		for node in &s.model.nodes {
			let d = ((node.x - 400.0).powi(2) + (node.y - 300.0).powi(2)).sqrt();
			assert!((d - 100.0).abs() < 1e-9);
		}
	}

	#[test]
	fn hit_testing_respects_kind_radius_and_transform() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		assert_eq!(s.node_at_position(sx, sy), Some(0));
		// Show radius 9 + padding 4: a point 14 units off misses.
		assert_eq!(s.node_at_position(sx + 14.0, sy), None);

		s.zoom(2.0, 400.0, 300.0);
		let (sx, sy) = screen_pos(&s, 0);
		assert_eq!(s.node_at_position(sx, sy), Some(0));
	}

	#[test]
	fn pointer_motion_synthesizes_hover_enter_and_leave() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_moved(sx, sy);
		assert_eq!(
			s.interaction,
			InteractionState::HoverPreview(s.model.nodes[0].key())
		);
		assert!(s.highlight.has_focus());

		// Off into empty space.
		s.pointer_moved(sx + 200.0, sy + 200.0);
		assert_eq!(s.interaction, InteractionState::Idle);
		assert!(!s.highlight.has_focus());
	}

	#[test]
	fn press_and_release_in_place_locks_the_node() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		let clicked = s.pointer_up(sx, sy);
		assert!(clicked);
		assert_eq!(
			s.interaction,
			InteractionState::LockedSelection(s.model.nodes[0].key())
		);
	}

	#[test]
	fn background_click_resets_to_idle() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		s.pointer_up(sx, sy);

		s.pointer_down(sx + 300.0, sy + 200.0);
		let clicked = s.pointer_up(sx + 300.0, sy + 200.0);
		assert!(clicked);
		assert_eq!(s.interaction, InteractionState::Idle);
		assert!(s.highlight.panel.is_none());
	}

	#[test]
	fn drag_pins_to_the_pointer_and_unpins_on_release() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		s.pointer_moved(sx + 40.0, sy + 25.0);

		let (gx, gy) = s.screen_to_graph(sx + 40.0, sy + 25.0);
		assert_eq!(s.model.nodes[0].fx, Some(gx));
		assert_eq!(s.model.nodes[0].fy, Some(gy));

		// Every tick during the drag lands the node exactly on the pointer.
		s.tick();
		assert_eq!(s.model.nodes[0].x, gx);
		assert_eq!(s.model.nodes[0].y, gy);

		let clicked = s.pointer_up(sx + 40.0, sy + 25.0);
		assert!(!clicked);
		assert_eq!(s.model.nodes[0].fx, None);
		assert_eq!(s.model.nodes[0].fy, None);
		assert_eq!(s.simulation.alpha_target(), 0.0);

		// Free integration takes over again.
		let before = (s.model.nodes[0].x, s.model.nodes[0].y);
		s.tick();
		assert_ne!((s.model.nodes[0].x, s.model.nodes[0].y), before);
	}

	#[test]
	fn dragging_keeps_the_simulation_warm() {
		let mut s = state();
		for _ in 0..2000 {
			if !s.tick() {
				break;
			}
		}
		assert!(!s.simulation.active());

		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		assert!(s.simulation.active());
		assert!(s.tick());
	}

	#[test]
	fn drag_does_not_change_focus() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		s.pointer_moved(sx + 50.0, sy);
		s.pointer_up(sx + 50.0, sy);
		assert_eq!(s.interaction, InteractionState::Idle);
	}

	#[test]
	fn zoom_is_clamped_between_half_and_double() {
		let mut s = state();
		for _ in 0..10 {
			s.zoom(1.5, 400.0, 300.0);
		}
		assert_eq!(s.transform.k, 2.0);
		for _ in 0..20 {
			s.zoom(0.5, 400.0, 300.0);
		}
		assert_eq!(s.transform.k, 0.5);
	}

	#[test]
	fn search_events_flow_through_the_state() {
		let mut s = state();
		s.apply_event(InputEvent::SearchChange("actor".into()));
		assert!(matches!(
			s.interaction,
			InteractionState::SearchFilter { ref matches, .. } if matches.len() == 1
		));
		assert!(s.highlight.panel.is_some());

		s.apply_event(InputEvent::SearchChange(String::new()));
		assert_eq!(s.interaction, InteractionState::Idle);
		assert!(s.highlight.panel.is_none());
	}

	#[test]
	fn kind_radius_differs_between_show_and_cast() {
		let s = state();
		let show_idx = 0;
		let cast_idx = 2;
		assert_eq!(s.model.nodes[show_idx].kind(), NodeKind::Show);
		assert_eq!(s.model.nodes[cast_idx].kind(), NodeKind::Cast);
	}
}
