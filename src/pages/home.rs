use leptos::prelude::*;
use log::error;

use crate::components::knowledge_graph::{
	KnowledgeGraphCanvas, RadialLayout, TaxonomyList, papa_nativa, validate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
	Graph,
	List,
}

/// Knowledge graph page: the radial diagram, or the same taxonomy as a list.
#[component]
pub fn Home() -> impl IntoView {
	let geometry = RadialLayout::default();
	let layout = Memo::new(move |_| {
		let taxonomy = papa_nativa();
		if let Err(err) = validate(&taxonomy) {
			error!("knowledge taxonomy is malformed: {err}");
		}
		geometry.compute(&taxonomy)
	});
	let mode = RwSignal::new(ViewMode::Graph);

	view! {
		<section class="graph-page">
			<header class="graph-header">
				<div>
					<h1>"Grafo de Conocimiento"</h1>
					<p class="subtitle">
						"Explora las conexiones entre variedades, plagas y técnicas"
					</p>
				</div>
				<div class="mode-toggle">
					<button
						class:active=move || mode.get() == ViewMode::Graph
						on:click=move |_| mode.set(ViewMode::Graph)
					>
						"Gráfico"
					</button>
					<button
						class:active=move || mode.get() == ViewMode::List
						on:click=move |_| mode.set(ViewMode::List)
					>
						"Lista"
					</button>
				</div>
			</header>
			<div class="graph-content">
				{move || match mode.get() {
					ViewMode::Graph => {
						view! { <KnowledgeGraphCanvas layout=layout geometry=geometry /> }.into_any()
					}
					ViewMode::List => view! { <TaxonomyList layout=layout /> }.into_any(),
				}}
			</div>
		</section>
	}
}
