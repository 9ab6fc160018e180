use super::layout::RadialLayout;
use super::types::{GraphLayout, LayoutNode};

/// Extra radius of the hovered node.
pub const HOVER_GROWTH: f64 = 5.0;
/// Distance from a node's centre to its label baseline, past the radius.
pub const LABEL_OFFSET: f64 = 20.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Zoom limits and transition timing for a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	/// Smallest allowed scale.
	pub min_scale: f64,
	/// Largest allowed scale.
	pub max_scale: f64,
	/// Scale restored by a reset.
	pub default_scale: f64,
	/// Factor applied by one zoom-in/zoom-out click.
	pub zoom_step: f64,
	/// Scale change per wheel delta unit.
	pub wheel_sensitivity: f64,
	/// Duration of the eased transition after discrete actions, in seconds.
	pub transition_secs: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.2,
			max_scale: 3.0,
			default_scale: 0.7,
			zoom_step: 1.2,
			wheel_sensitivity: 0.001,
			transition_secs: 0.1,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
struct Transition {
	from: ViewTransform,
	elapsed: f64,
}

/// Pan and zoom state: where the view is heading and what is on screen.
#[derive(Clone, Debug)]
pub struct Viewport {
	pub config: ViewportConfig,
	pub pan: PanState,
	target: ViewTransform,
	shown: ViewTransform,
	transition: Option<Transition>,
}

impl Viewport {
	pub fn new(config: ViewportConfig) -> Self {
		let home = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: config.default_scale,
		};
		Self {
			config,
			pan: PanState::default(),
			target: home,
			shown: home,
			transition: None,
		}
	}

	/// Transform the view is settling on.
	pub fn target(&self) -> ViewTransform {
		self.target
	}

	/// Transform currently drawn.
	pub fn shown(&self) -> ViewTransform {
		self.shown
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	fn clamp_scale(&self, k: f64) -> f64 {
		k.clamp(self.config.min_scale, self.config.max_scale)
	}

	fn animate_to(&mut self, target: ViewTransform) {
		if target == self.target {
			return;
		}
		self.transition = Some(Transition {
			from: self.shown,
			elapsed: 0.0,
		});
		self.target = target;
	}

	fn jump_to(&mut self, target: ViewTransform) {
		self.transition = None;
		self.target = target;
		self.shown = target;
	}

	pub fn begin_pan(&mut self, px: f64, py: f64) {
		self.pan = PanState {
			active: true,
			start_x: px,
			start_y: py,
			transform_start_x: self.target.x,
			transform_start_y: self.target.y,
		};
	}

	/// Moves the offset with the pointer; no easing while dragging.
	pub fn pan_to(&mut self, px: f64, py: f64) {
		if !self.pan.active {
			return;
		}
		let target = ViewTransform {
			x: self.pan.transform_start_x + (px - self.pan.start_x),
			y: self.pan.transform_start_y + (py - self.pan.start_y),
			k: self.target.k,
		};
		self.jump_to(target);
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Wheel zoom: scrolling down (positive delta) zooms out.
	pub fn wheel(&mut self, delta_y: f64) {
		let k = self.clamp_scale(self.target.k - delta_y * self.config.wheel_sensitivity);
		self.set_scale(k);
	}

	pub fn zoom_in(&mut self) {
		let k = self.clamp_scale(self.target.k * self.config.zoom_step);
		self.set_scale(k);
	}

	pub fn zoom_out(&mut self) {
		let k = self.clamp_scale(self.target.k / self.config.zoom_step);
		self.set_scale(k);
	}

	fn set_scale(&mut self, k: f64) {
		let target = ViewTransform { k, ..self.target };
		if self.pan.active {
			self.jump_to(target);
		} else {
			self.animate_to(target);
		}
	}

	/// Back to offset (0, 0) at the default scale.
	pub fn reset(&mut self) {
		self.pan.active = false;
		self.animate_to(ViewTransform {
			x: 0.0,
			y: 0.0,
			k: self.config.default_scale,
		});
	}

	/// Advances the transition by `dt` seconds. Returns whether more frames
	/// are needed.
	pub fn tick(&mut self, dt: f64) -> bool {
		let Some(transition) = self.transition.as_mut() else {
			return false;
		};
		transition.elapsed += dt.max(0.0);
		let t = if self.config.transition_secs > 0.0 {
			(transition.elapsed / self.config.transition_secs).min(1.0)
		} else {
			1.0
		};
		if t >= 1.0 {
			self.shown = self.target;
			self.transition = None;
			return false;
		}
		self.shown = transition.from.lerp(&self.target, ease_out_cubic(t));
		true
	}
}

/// Everything the canvas needs between frames: the laid-out graph, the
/// viewport and the hovered node.
pub struct KnowledgeGraphState {
	pub layout: GraphLayout,
	pub viewport: Viewport,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	graph_center: (f64, f64),
	/// Last canvas-relative pointer position; `None` once it leaves.
	pointer: Option<(f64, f64)>,
}

impl KnowledgeGraphState {
	pub fn new(
		layout: GraphLayout,
		geometry: &RadialLayout,
		config: ViewportConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self {
			layout,
			viewport: Viewport::new(config),
			hovered: None,
			width,
			height,
			graph_center: geometry.center(),
			pointer: None,
		}
	}

	/// Screen position of the graph centre under the shown transform.
	pub fn origin(&self) -> (f64, f64) {
		let t = self.viewport.shown();
		(self.width / 2.0 + t.x, self.height / 2.0 + t.y)
	}

	pub fn graph_center(&self) -> (f64, f64) {
		self.graph_center
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (ox, oy) = self.origin();
		let k = self.viewport.shown().k;
		let (cx, cy) = self.graph_center;
		((sx - ox) / k + cx, (sy - oy) / k + cy)
	}

	/// Drawn radius of node `idx`, including hover growth.
	pub fn node_radius(&self, idx: usize, node: &LayoutNode) -> f64 {
		let base = node.kind.radius();
		if self.is_hovered(idx) {
			base + HOVER_GROWTH
		} else {
			base
		}
	}

	/// Topmost node under the screen point, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Later nodes draw on top, so they win.
		self.layout
			.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(idx, node)| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() <= self.node_radius(*idx, node)
			})
			.map(|(idx, _)| idx)
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// Records the pointer and re-runs the hit test under it. Returns whether
	/// the hovered node changed.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) -> bool {
		self.pointer = Some((sx, sy));
		self.refresh_hover()
	}

	pub fn pointer_left(&mut self) -> bool {
		self.pointer = None;
		self.set_hover(None)
	}

	/// Hit-tests the last pointer position against the shown transform.
	/// Hover is frozen while panning.
	pub fn refresh_hover(&mut self) -> bool {
		if self.viewport.is_panning() {
			return false;
		}
		let hit = self.pointer.and_then(|(x, y)| self.node_at_position(x, y));
		self.set_hover(hit)
	}

	/// Wheel zoom with the pointer at `(sx, sy)`. Returns whether the hovered
	/// node changed.
	pub fn wheel_at(&mut self, sx: f64, sy: f64, delta_y: f64) -> bool {
		self.viewport.wheel(delta_y);
		self.pointer_moved(sx, sy)
	}

	/// Returns to the default view and drops the highlight; the next frame
	/// after the transition re-hovers whatever ends up under the pointer.
	pub fn reset_view(&mut self) {
		self.viewport.reset();
		self.set_hover(None);
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hovered == Some(idx)
	}

	/// Root and category labels always show; leaf labels only on hover.
	pub fn label_visible(&self, idx: usize, node: &LayoutNode) -> bool {
		!node.kind.is_leaf() || self.is_hovered(idx)
	}

	/// Advances any running transition; true while frames are still needed.
	/// Hover follows the view while it moves under a still pointer.
	pub fn tick(&mut self, dt: f64) -> bool {
		let moving = self.viewport.is_animating();
		self.viewport.tick(dt);
		if moving {
			self.refresh_hover();
		}
		self.viewport.is_animating()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::taxonomy::papa_nativa;
	use crate::components::knowledge_graph::types::NodeKind;

	fn settle(viewport: &mut Viewport) {
		while viewport.tick(0.016) {}
	}

	fn graph_to_screen(s: &KnowledgeGraphState, gx: f64, gy: f64) -> (f64, f64) {
		let (ox, oy) = s.origin();
		let k = s.viewport.shown().k;
		let (cx, cy) = s.graph_center();
		(ox + (gx - cx) * k, oy + (gy - cy) * k)
	}

	fn graph_state() -> KnowledgeGraphState {
		let geometry = RadialLayout::default();
		KnowledgeGraphState::new(
			geometry.compute(&papa_nativa()),
			&geometry,
			ViewportConfig::default(),
			800.0,
			600.0,
		)
	}

	#[test]
	fn starts_at_default() {
		let v = Viewport::new(ViewportConfig::default());
		assert_eq!(
			v.shown(),
			ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 0.7
			}
		);
		assert!(!v.is_animating());
	}

	#[test]
	fn zoom_in_is_clamped_to_max() {
		let mut v = Viewport::new(ViewportConfig::default());
		for _ in 0..500 {
			v.zoom_in();
		}
		assert_eq!(v.target().k, 3.0);
		settle(&mut v);
		assert_eq!(v.shown().k, 3.0);
	}

	#[test]
	fn zoom_out_is_clamped_to_min() {
		let mut v = Viewport::new(ViewportConfig::default());
		for _ in 0..500 {
			v.zoom_out();
			v.tick(0.05);
		}
		assert_eq!(v.target().k, 0.2);
	}

	#[test]
	fn wheel_scales_by_delta_and_clamps() {
		let mut v = Viewport::new(ViewportConfig::default());
		v.wheel(-100.0);
		assert!((v.target().k - 0.8).abs() < 1e-12);
		v.wheel(200.0);
		assert!((v.target().k - 0.6).abs() < 1e-12);
		for _ in 0..1000 {
			v.wheel(-1000.0);
		}
		assert_eq!(v.target().k, 3.0);
		for _ in 0..1000 {
			v.wheel(1000.0);
		}
		assert_eq!(v.target().k, 0.2);
	}

	#[test]
	fn pan_tracks_pointer_without_easing() {
		let mut v = Viewport::new(ViewportConfig::default());
		v.begin_pan(100.0, 100.0);
		v.pan_to(130.0, 80.0);
		assert_eq!((v.shown().x, v.shown().y), (30.0, -20.0));
		assert!(!v.is_animating());
		v.pan_to(90.0, 110.0);
		assert_eq!((v.shown().x, v.shown().y), (-10.0, 10.0));
		v.end_pan();

		// A second drag continues from the frozen offset.
		v.begin_pan(0.0, 0.0);
		v.pan_to(5.0, 5.0);
		assert_eq!((v.shown().x, v.shown().y), (-5.0, 15.0));
		v.end_pan();
		v.pan_to(500.0, 500.0);
		assert_eq!((v.shown().x, v.shown().y), (-5.0, 15.0));
	}

	#[test]
	fn reset_restores_default_after_any_history() {
		let mut v = Viewport::new(ViewportConfig::default());
		v.begin_pan(0.0, 0.0);
		v.pan_to(-340.0, 77.0);
		v.end_pan();
		for _ in 0..7 {
			v.zoom_in();
		}
		v.wheel(-250.0);
		settle(&mut v);
		v.reset();
		assert_eq!(
			v.target(),
			ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 0.7
			}
		);
		assert!(v.is_animating());
		settle(&mut v);
		assert_eq!(v.shown(), v.target());
	}

	#[test]
	fn discrete_zoom_eases_then_settles() {
		let mut v = Viewport::new(ViewportConfig::default());
		v.zoom_in();
		assert_eq!(v.shown().k, 0.7);
		assert!(v.tick(0.0));
		assert!(v.tick(0.05));
		let mid = v.shown().k;
		assert!(mid > 0.7 && mid < 0.84);
		assert!(!v.tick(0.05));
		assert!((v.shown().k - 0.84).abs() < 1e-12);
		assert!(!v.tick(0.05));
	}

	#[test]
	fn drag_interrupts_transition() {
		let mut v = Viewport::new(ViewportConfig::default());
		v.zoom_in();
		v.tick(0.02);
		v.begin_pan(0.0, 0.0);
		v.pan_to(10.0, 0.0);
		assert!(!v.is_animating());
		assert_eq!(v.shown(), v.target());
		assert!((v.shown().k - 0.84).abs() < 1e-12);
	}

	#[test]
	fn screen_graph_round_trip() {
		let mut s = graph_state();
		assert_eq!(graph_to_screen(&s, 600.0, 600.0), (400.0, 300.0));
		s.viewport.begin_pan(0.0, 0.0);
		s.viewport.pan_to(37.0, -12.0);
		s.viewport.end_pan();
		s.viewport.zoom_in();
		while s.tick(0.016) {}
		let (sx, sy) = graph_to_screen(&s, 123.0, 456.0);
		let (gx, gy) = s.screen_to_graph(sx, sy);
		assert!((gx - 123.0).abs() < 1e-9);
		assert!((gy - 456.0).abs() < 1e-9);
		assert_eq!(graph_to_screen(&s, 600.0, 600.0), (437.0, 288.0));
	}

	#[test]
	fn hit_test_finds_nodes_under_pointer() {
		let s = graph_state();
		let root = s.layout.nodes.iter().position(|n| n.id == "Papa").unwrap();
		assert_eq!(s.node_at_position(400.0, 300.0), Some(root));

		let rancha = s.layout.nodes.iter().position(|n| n.id == "Rancha").unwrap();
		let node = &s.layout.nodes[rancha];
		let (sx, sy) = graph_to_screen(&s, node.x, node.y);
		assert_eq!(s.node_at_position(sx, sy), Some(rancha));

		assert_eq!(s.node_at_position(2.0, 2.0), None);
	}

	#[test]
	fn hover_reveals_leaf_labels_only() {
		let mut s = graph_state();
		let leaf = s.layout.nodes.iter().position(|n| n.kind.is_leaf()).unwrap();
		let cat = s
			.layout
			.nodes
			.iter()
			.position(|n| n.kind == NodeKind::Category)
			.unwrap();
		let (leaf_node, cat_node) = (s.layout.nodes[leaf].clone(), s.layout.nodes[cat].clone());

		assert!(!s.label_visible(leaf, &leaf_node));
		assert!(s.label_visible(cat, &cat_node));

		assert!(s.set_hover(Some(leaf)));
		assert!(!s.set_hover(Some(leaf)));
		assert!(s.label_visible(leaf, &leaf_node));
		assert_eq!(s.node_radius(leaf, &leaf_node), 18.0 + HOVER_GROWTH);
		assert_eq!(s.node_radius(cat, &cat_node), 35.0);

		assert!(s.set_hover(Some(cat)));
		assert!(!s.label_visible(leaf, &leaf_node));
		assert!(s.set_hover(None));
		assert!(s.label_visible(cat, &cat_node));
	}

	#[test]
	fn wheel_rehovers_under_still_pointer() {
		let mut s = graph_state();
		let root = s.layout.nodes.iter().position(|n| n.id == "Papa").unwrap();
		// Just outside the root's rim at k = 0.7, inside it at k = 1.0.
		assert!(!s.pointer_moved(440.0, 300.0));
		assert_eq!(s.hovered, None);

		assert!(!s.wheel_at(440.0, 300.0, -300.0));
		assert!(s.viewport.is_animating());
		while s.tick(0.016) {}
		assert!((s.viewport.shown().k - 1.0).abs() < 1e-12);
		assert_eq!(s.hovered, Some(root));

		// Zooming back out slides the root away from the pointer.
		s.wheel_at(440.0, 300.0, 300.0);
		while s.tick(0.016) {}
		assert_eq!(s.hovered, None);
	}

	#[test]
	fn reset_clears_hover_until_the_view_settles() {
		let mut s = graph_state();
		let root = s.layout.nodes.iter().position(|n| n.id == "Papa").unwrap();
		assert!(s.pointer_moved(400.0, 300.0));
		assert_eq!(s.hovered, Some(root));
		s.viewport.zoom_in();
		while s.tick(0.016) {}
		assert_eq!(s.hovered, Some(root));

		s.reset_view();
		assert_eq!(s.hovered, None);
		while s.tick(0.016) {}
		assert_eq!(s.hovered, Some(root));

		// Pressing a control takes the pointer off the canvas first.
		s.viewport.zoom_in();
		while s.tick(0.016) {}
		assert!(s.pointer_left());
		s.reset_view();
		while s.tick(0.016) {}
		assert_eq!(s.hovered, None);
	}

	#[test]
	fn hover_is_frozen_while_panning() {
		let mut s = graph_state();
		s.viewport.begin_pan(400.0, 300.0);
		assert!(!s.pointer_moved(400.0, 300.0));
		assert_eq!(s.hovered, None);
		s.viewport.end_pan();
		assert!(s.refresh_hover());
		assert!(s.hovered.is_some());
	}
}
