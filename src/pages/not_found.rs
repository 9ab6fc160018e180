use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"Página no encontrada"</h1>
			<a href="/">"Volver al grafo"</a>
		</section>
	}
}
