//! The Papa Nativa knowledge taxonomy and its structural checks.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{NodeKind, TaxonomyNode};

/// Structural defect in a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
	/// No node of kind root.
	#[error("taxonomy has no root node")]
	MissingRoot,
	/// More than one node of kind root.
	#[error("taxonomy has more than one root: `{first}` and `{second}`")]
	MultipleRoots {
		/// First root seen.
		first: String,
		/// Second root seen.
		second: String,
	},
	/// Two nodes share an identifier.
	#[error("duplicate node id `{0}`")]
	DuplicateId(String),
	/// A node references a parent that isn't in the taxonomy.
	#[error("node `{node}` references missing parent `{parent}`")]
	DanglingParent {
		/// Offending node.
		node: String,
		/// Missing parent id.
		parent: String,
	},
	/// A node sits at the wrong depth of the two-level tree.
	#[error("node `{node}` of kind {kind:?} cannot hang under `{parent}`")]
	MisplacedNode {
		/// Offending node.
		node: String,
		/// Its kind.
		kind: NodeKind,
		/// Its parent id, or `-` when it has none.
		parent: String,
	},
}

const PAPA_NATIVA: &[(&str, &str, NodeKind, Option<&str>)] = &[
	("Papa", "Papa Nativa", NodeKind::Root, None),
	// Clusters
	("Variedades", "Variedades", NodeKind::Category, Some("Papa")),
	("Plagas", "Plagas y Enf.", NodeKind::Category, Some("Papa")),
	("Cultivo", "Agronomía", NodeKind::Category, Some("Papa")),
	("Valor", "Valor Agregado", NodeKind::Category, Some("Papa")),
	("Historia", "Historia", NodeKind::Category, Some("Papa")),
	// Varieties
	("Huayro", "Huayro", NodeKind::Variety, Some("Variedades")),
	("Amarilla", "Amarilla", NodeKind::Variety, Some("Variedades")),
	("Canchan", "Canchan", NodeKind::Variety, Some("Variedades")),
	("Peruanita", "Peruanita", NodeKind::Variety, Some("Variedades")),
	("Púrpura", "Púrpura", NodeKind::Variety, Some("Variedades")),
	("Negra", "Negra Andina", NodeKind::Variety, Some("Variedades")),
	// Pests
	("Rancha", "Tizón Tardío", NodeKind::Pest, Some("Plagas")),
	("Gorgojo", "Gorgojo Andes", NodeKind::Pest, Some("Plagas")),
	("VirusY", "Virus PVY", NodeKind::Pest, Some("Plagas")),
	("Nematodo", "Nematodo Quiste", NodeKind::Pest, Some("Plagas")),
	// Agronomy
	("Siembra", "Siembra", NodeKind::AgronomicPractice, Some("Cultivo")),
	("Riego", "Riego", NodeKind::AgronomicPractice, Some("Cultivo")),
	("Aporque", "Aporque", NodeKind::AgronomicPractice, Some("Cultivo")),
	("ControlBio", "Control Bio", NodeKind::AgronomicPractice, Some("Cultivo")),
	("Suelo", "Suelo Franco", NodeKind::AgronomicPractice, Some("Cultivo")),
	// Value added
	("Nutricion", "Nutrición", NodeKind::ValueAddedUse, Some("Valor")),
	("Chuno", "Chuño/Tunta", NodeKind::ValueAddedUse, Some("Valor")),
	("Gastronomia", "Gastronomía", NodeKind::ValueAddedUse, Some("Valor")),
	("Chips", "Procesados", NodeKind::ValueAddedUse, Some("Valor")),
	// History
	("Origen", "Andes Centrales", NodeKind::HistoricalFact, Some("Historia")),
	("Domesticacion", "8000 Años", NodeKind::HistoricalFact, Some("Historia")),
	("Expansion", "Global", NodeKind::HistoricalFact, Some("Historia")),
];

/// The knowledge base taxonomy: one root, five clusters and their leaves.
pub fn papa_nativa() -> Vec<TaxonomyNode> {
	PAPA_NATIVA
		.iter()
		.map(|&(id, label, kind, parent)| TaxonomyNode::new(id, label, kind, parent))
		.collect()
}

/// Checks that `nodes` form a strict root -> category -> leaf tree.
pub fn validate(nodes: &[TaxonomyNode]) -> Result<(), TaxonomyError> {
	let mut kinds: HashMap<&str, NodeKind> = HashMap::with_capacity(nodes.len());
	let mut root: Option<&str> = None;

	for node in nodes {
		if kinds.insert(node.id.as_str(), node.kind).is_some() {
			return Err(TaxonomyError::DuplicateId(node.id.clone()));
		}
		if node.kind == NodeKind::Root {
			if let Some(first) = root {
				return Err(TaxonomyError::MultipleRoots {
					first: first.into(),
					second: node.id.clone(),
				});
			}
			root = Some(node.id.as_str());
		}
	}
	if root.is_none() {
		return Err(TaxonomyError::MissingRoot);
	}

	for node in nodes {
		let misplaced = || TaxonomyError::MisplacedNode {
			node: node.id.clone(),
			kind: node.kind,
			parent: node.parent.clone().unwrap_or_else(|| "-".into()),
		};
		let Some(parent) = node.parent.as_deref() else {
			if node.kind == NodeKind::Root {
				continue;
			}
			return Err(misplaced());
		};
		let Some(&parent_kind) = kinds.get(parent) else {
			return Err(TaxonomyError::DanglingParent {
				node: node.id.clone(),
				parent: parent.into(),
			});
		};
		let expected = match node.kind {
			NodeKind::Root => return Err(misplaced()),
			NodeKind::Category => NodeKind::Root,
			_ => NodeKind::Category,
		};
		if parent_kind != expected {
			return Err(misplaced());
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> TaxonomyNode {
		TaxonomyNode::new(id, id, kind, parent)
	}

	#[test]
	fn papa_nativa_is_valid() {
		let nodes = papa_nativa();
		assert_eq!(validate(&nodes), Ok(()));
		assert_eq!(nodes.len(), 28);
		assert_eq!(
			nodes.iter().filter(|n| n.kind == NodeKind::Category).count(),
			5
		);
	}

	#[test]
	fn missing_root() {
		let nodes = vec![node("a", NodeKind::Category, None)];
		assert_eq!(validate(&nodes), Err(TaxonomyError::MissingRoot));
	}

	#[test]
	fn multiple_roots() {
		let nodes = vec![node("a", NodeKind::Root, None), node("b", NodeKind::Root, None)];
		assert_eq!(
			validate(&nodes),
			Err(TaxonomyError::MultipleRoots {
				first: "a".into(),
				second: "b".into()
			})
		);
	}

	#[test]
	fn duplicate_id() {
		let nodes = vec![
			node("r", NodeKind::Root, None),
			node("c", NodeKind::Category, Some("r")),
			node("c", NodeKind::Category, Some("r")),
		];
		assert_eq!(validate(&nodes), Err(TaxonomyError::DuplicateId("c".into())));
	}

	#[test]
	fn dangling_parent() {
		let nodes = vec![
			node("r", NodeKind::Root, None),
			node("leaf", NodeKind::Pest, Some("nowhere")),
		];
		assert_eq!(
			validate(&nodes),
			Err(TaxonomyError::DanglingParent {
				node: "leaf".into(),
				parent: "nowhere".into()
			})
		);
	}

	#[test]
	fn leaf_under_root_is_misplaced() {
		let nodes = vec![
			node("r", NodeKind::Root, None),
			node("leaf", NodeKind::Variety, Some("r")),
		];
		assert!(matches!(
			validate(&nodes),
			Err(TaxonomyError::MisplacedNode { ref node, .. }) if node == "leaf"
		));
	}

	#[test]
	fn orphan_category_is_misplaced() {
		let nodes = vec![
			node("r", NodeKind::Root, None),
			node("c", NodeKind::Category, None),
		];
		let err = validate(&nodes).unwrap_err();
		assert_eq!(
			err.to_string(),
			"node `c` of kind Category cannot hang under `-`"
		);
	}
}
