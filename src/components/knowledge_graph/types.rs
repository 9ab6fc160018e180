/// Semantic category of a taxonomy node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// The single centre node.
	Root,
	/// A cluster on the inner ring.
	Category,
	/// A native potato variety.
	Variety,
	/// A pest or disease.
	Pest,
	/// A cultivation practice.
	AgronomicPractice,
	/// A processed or value-added use.
	ValueAddedUse,
	/// A historical fact.
	HistoricalFact,
}

impl NodeKind {
	/// Leaves sit on the outer ring; everything but the root and categories.
	pub fn is_leaf(self) -> bool {
		!matches!(self, NodeKind::Root | NodeKind::Category)
	}

	/// Fill colour used on the canvas and in the list view.
	pub fn color(self) -> &'static str {
		match self {
			NodeKind::Root => "#d97706",
			NodeKind::Category => "#4b5563",
			NodeKind::Variety => "#db2777",
			NodeKind::Pest => "#dc2626",
			NodeKind::AgronomicPractice => "#16a34a",
			NodeKind::ValueAddedUse => "#2563eb",
			NodeKind::HistoricalFact => "#7c3aed",
		}
	}

	/// Base circle radius in graph units.
	pub fn radius(self) -> f64 {
		match self {
			NodeKind::Root => 45.0,
			NodeKind::Category => 35.0,
			_ => 18.0,
		}
	}

	/// Label font size in graph units.
	pub fn font_px(self) -> f64 {
		match self {
			NodeKind::Root => 16.0,
			_ => 12.0,
		}
	}
}

/// A node of the static taxonomy, before layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TaxonomyNode {
	/// Unique identifier.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Semantic category.
	pub kind: NodeKind,
	/// Identifier of the parent node, `None` for the root.
	pub parent: Option<String>,
}

impl TaxonomyNode {
	/// Convenience constructor for string literals.
	pub fn new(id: &str, label: &str, kind: NodeKind, parent: Option<&str>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind,
			parent: parent.map(Into::into),
		}
	}
}

/// A taxonomy node with its computed canvas position.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	/// Unique identifier.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Semantic category.
	pub kind: NodeKind,
	/// Identifier of the parent node.
	pub parent: Option<String>,
	/// Canvas x coordinate.
	pub x: f64,
	/// Canvas y coordinate.
	pub y: f64,
	/// Polar angle from the canvas centre in radians; `None` for the root.
	pub angle: Option<f64>,
}

/// Directed parent -> child edge, as indices into [`GraphLayout::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Parent index.
	pub source: usize,
	/// Child index.
	pub target: usize,
}

/// Output of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLayout {
	/// Placed nodes, in taxonomy order.
	pub nodes: Vec<LayoutNode>,
	/// Root -> category edges first, then category -> leaf edges.
	pub edges: Vec<GraphEdge>,
}

impl GraphLayout {
	/// Looks a node up by identifier.
	pub fn node(&self, id: &str) -> Option<&LayoutNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Category nodes, in taxonomy order.
	pub fn categories(&self) -> impl Iterator<Item = &LayoutNode> {
		self.nodes.iter().filter(|n| n.kind == NodeKind::Category)
	}

	/// Direct children of `id`, in taxonomy order.
	pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a LayoutNode> + 'a {
		self.nodes
			.iter()
			.filter(move |n| n.parent.as_deref() == Some(id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn leaf_kinds() {
		assert!(!NodeKind::Root.is_leaf());
		assert!(!NodeKind::Category.is_leaf());
		for kind in [
			NodeKind::Variety,
			NodeKind::Pest,
			NodeKind::AgronomicPractice,
			NodeKind::ValueAddedUse,
			NodeKind::HistoricalFact,
		] {
			assert!(kind.is_leaf());
			assert_eq!(kind.radius(), 18.0);
		}
	}

	#[test]
	fn root_is_largest() {
		assert!(NodeKind::Root.radius() > NodeKind::Category.radius());
		assert_eq!(NodeKind::Root.font_px(), 16.0);
		assert_eq!(NodeKind::Pest.font_px(), 12.0);
	}
}
