mod component;
mod layout;
mod list;
mod render;
mod state;
mod taxonomy;
mod types;

pub use component::KnowledgeGraphCanvas;
pub use layout::RadialLayout;
pub use list::TaxonomyList;
pub use state::ViewportConfig;
pub use taxonomy::{TaxonomyError, papa_nativa, validate};
pub use types::{GraphEdge, GraphLayout, LayoutNode, NodeKind, TaxonomyNode};
