//! QHAPAQ knowledge graph: a client-side Leptos app that lays out the
//! native-potato taxonomy radially on a canvas the visitor can drag and zoom.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::components::knowledge_graph::{
	GraphEdge, GraphLayout, KnowledgeGraphCanvas, LayoutNode, NodeKind, RadialLayout,
	TaxonomyError, TaxonomyList, TaxonomyNode, ViewportConfig, papa_nativa, validate,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Spanish-language shell: document metadata plus the route to the graph page.
/// Unknown paths land on the 404 page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="es" attr:dir="ltr" attr:data-theme="light" />

		<Title text="QHAPAQ · Grafo de Conocimiento" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
