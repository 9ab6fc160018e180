use leptos::prelude::*;

use super::types::GraphLayout;

/// Fallback list rendering: one card per category with its leaves.
#[component]
pub fn TaxonomyList(
	/// Layout whose categories and children are listed.
	#[prop(into)]
	layout: Signal<GraphLayout>,
) -> impl IntoView {
	let cards = move || {
		let layout = layout.get();
		layout
			.categories()
			.map(|category| {
				let accent = format!("border-left: 4px solid {};", category.kind.color());
				let leaves = layout
					.children_of(&category.id)
					.map(|leaf| {
						let dot = format!("background-color: {};", leaf.kind.color());
						view! {
							<li class="taxonomy-leaf">
								<span class="taxonomy-dot" style=dot></span>
								<span>{leaf.label.clone()}</span>
							</li>
						}
					})
					.collect_view();
				view! {
					<div class="taxonomy-card">
						<div class="taxonomy-card-header" style=accent>
							<h3>{category.label.clone()}</h3>
						</div>
						<ul>{leaves}</ul>
					</div>
				}
			})
			.collect_view()
	};

	view! { <div class="taxonomy-list">{cards}</div> }
}
