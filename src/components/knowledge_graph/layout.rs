//! Deterministic radial tree layout.
//!
//! The root sits at the canvas centre, categories are spread evenly on an
//! inner ring starting straight up, and each category fans its leaves out
//! on an outer ring inside a fixed-width arc centred on its own angle.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};

use super::types::{GraphEdge, GraphLayout, LayoutNode, NodeKind, TaxonomyNode};

/// Ring geometry for [`RadialLayout::compute`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialLayout {
	/// Side of the square canvas in graph units.
	pub canvas_size: f64,
	/// Radius of the category ring.
	pub inner_radius: f64,
	/// Radius of the leaf ring.
	pub outer_radius: f64,
	/// Angular width of each category's leaf arc, in radians.
	pub leaf_spread: f64,
}

impl Default for RadialLayout {
	fn default() -> Self {
		Self {
			canvas_size: 1200.0,
			inner_radius: 200.0,
			outer_radius: 400.0,
			leaf_spread: PI / 3.5,
		}
	}
}

impl RadialLayout {
	/// Centre of the canvas; where the root goes.
	pub fn center(&self) -> (f64, f64) {
		(self.canvas_size / 2.0, self.canvas_size / 2.0)
	}

	fn polar(&self, radius: f64, angle: f64) -> (f64, f64) {
		let (cx, cy) = self.center();
		(cx + radius * angle.cos(), cy + radius * angle.sin())
	}

	/// Angle of the `index`-th of `count` categories.
	pub fn category_angle(index: usize, count: usize) -> f64 {
		let step = 2.0 * PI / count as f64;
		index as f64 * step - PI / 2.0
	}

	/// Angles of `count` leaves fanned around `center_angle`.
	pub fn leaf_angles(&self, center_angle: f64, count: usize) -> Vec<f64> {
		match count {
			0 => Vec::new(),
			1 => vec![center_angle],
			_ => {
				let start = center_angle - self.leaf_spread / 2.0;
				let step = self.leaf_spread / (count - 1) as f64;
				(0..count).map(|i| start + i as f64 * step).collect()
			}
		}
	}

	/// Places every reachable node of `taxonomy`.
	///
	/// Output nodes keep taxonomy order. Nodes that are neither the root, a
	/// category, nor a child of a category are left out.
	pub fn compute(&self, taxonomy: &[TaxonomyNode]) -> GraphLayout {
		let mut placed: Vec<Option<((f64, f64), Option<f64>)>> = vec![None; taxonomy.len()];
		let mut links: Vec<(usize, usize)> = Vec::new();

		let root = taxonomy.iter().position(|n| n.kind == NodeKind::Root);
		if let Some(r) = root {
			placed[r] = Some((self.center(), None));
		}

		let categories: Vec<usize> = taxonomy
			.iter()
			.enumerate()
			.filter(|(_, n)| n.kind == NodeKind::Category)
			.map(|(i, _)| i)
			.collect();

		let mut category_angles = HashMap::with_capacity(categories.len());
		for (index, &cat) in categories.iter().enumerate() {
			let angle = Self::category_angle(index, categories.len());
			placed[cat] = Some((self.polar(self.inner_radius, angle), Some(angle)));
			category_angles.insert(taxonomy[cat].id.as_str(), angle);
			if let Some(r) = root {
				links.push((r, cat));
			}
		}

		for &cat in &categories {
			let cat_id = taxonomy[cat].id.as_str();
			let children: Vec<usize> = taxonomy
				.iter()
				.enumerate()
				.filter(|(_, n)| n.parent.as_deref() == Some(cat_id))
				.map(|(i, _)| i)
				.collect();
			if children.is_empty() {
				continue;
			}
			let angles = self.leaf_angles(category_angles[cat_id], children.len());
			for (&child, angle) in children.iter().zip(angles) {
				placed[child] = Some((self.polar(self.outer_radius, angle), Some(angle)));
				links.push((cat, child));
			}
		}

		let mut remap = vec![usize::MAX; taxonomy.len()];
		let mut nodes = Vec::with_capacity(taxonomy.len());
		for (i, (node, slot)) in taxonomy.iter().zip(&placed).enumerate() {
			let Some(((x, y), angle)) = *slot else {
				warn!("node `{}` has no place in the radial tree, skipping", node.id);
				continue;
			};
			remap[i] = nodes.len();
			nodes.push(LayoutNode {
				id: node.id.clone(),
				label: node.label.clone(),
				kind: node.kind,
				parent: node.parent.clone(),
				x,
				y,
				angle,
			});
		}
		let edges: Vec<GraphEdge> = links
			.into_iter()
			.map(|(s, t)| GraphEdge {
				source: remap[s],
				target: remap[t],
			})
			.collect();

		debug!(
			"radial layout: {} nodes, {} edges, {} categories",
			nodes.len(),
			edges.len(),
			categories.len()
		);
		GraphLayout { nodes, edges }
	}
}
