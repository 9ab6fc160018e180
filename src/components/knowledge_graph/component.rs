use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use leptos::ev;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::RadialLayout;
use super::render;
use super::state::{KnowledgeGraphState, ViewportConfig};
use super::types::GraphLayout;

/// State shared by the event handlers and the frame callback.
struct Scene {
	state: RefCell<Option<KnowledgeGraphState>>,
	ctx: RefCell<Option<CanvasRenderingContext2d>>,
	cursor: RwSignal<&'static str>,
	frame_pending: Cell<bool>,
	last_frame_ms: Cell<Option<f64>>,
}

impl Scene {
	fn new(cursor: RwSignal<&'static str>) -> Self {
		Self {
			state: RefCell::default(),
			ctx: RefCell::default(),
			cursor,
			frame_pending: Cell::new(false),
			last_frame_ms: Cell::new(None),
		}
	}

	/// Pointer over a node or open hand; the drag cursor is left alone.
	fn sync_cursor(&self, state: &KnowledgeGraphState) {
		if !state.viewport.is_panning() {
			self.cursor
				.set(if state.hovered.is_some() { "pointer" } else { "grab" });
		}
	}

	/// Schedules a single redraw; repeated requests before it runs coalesce.
	fn request_frame(self: &Rc<Self>) {
		if self.frame_pending.replace(true) {
			return;
		}
		let Some(window) = web_sys::window() else {
			self.frame_pending.set(false);
			return;
		};
		let scene = Rc::clone(self);
		let cb = Closure::once_into_js(move || scene.draw_frame());
		if window.request_animation_frame(cb.unchecked_ref()).is_err() {
			self.frame_pending.set(false);
		}
	}

	fn draw_frame(self: &Rc<Self>) {
		self.frame_pending.set(false);
		let now = js_sys::Date::now();
		let dt = self
			.last_frame_ms
			.replace(Some(now))
			.map_or(0.0, |last| (now - last) / 1000.0);

		let animating = {
			let mut guard = self.state.borrow_mut();
			let Some(state) = guard.as_mut() else {
				return;
			};
			let hovered = state.hovered;
			let animating = state.tick(dt);
			if state.hovered != hovered {
				self.sync_cursor(state);
			}
			if let Some(ctx) = self.ctx.borrow().as_ref() {
				render::render(state, ctx);
			}
			animating
		};

		if animating {
			self.request_frame();
		} else {
			self.last_frame_ms.set(None);
		}
	}

	fn with_state(self: &Rc<Self>, f: impl FnOnce(&mut KnowledgeGraphState)) {
		if let Some(state) = self.state.borrow_mut().as_mut() {
			f(state);
		}
		self.request_frame();
	}
}

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// Pointer position relative to the canvas's top-left corner.
fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		event.client_x() as f64 - rect.left(),
		event.client_y() as f64 - rect.top(),
	)
}

fn detach(listeners: &Mutex<Vec<WindowListenerHandle>>) {
	if let Ok(mut handles) = listeners.lock() {
		for handle in handles.drain(..) {
			handle.remove();
		}
	}
}

/// Pannable, zoomable canvas rendering of a radially laid-out taxonomy.
#[component]
pub fn KnowledgeGraphCanvas(
	/// Positioned nodes and edges to draw.
	#[prop(into)]
	layout: Signal<GraphLayout>,
	/// Geometry `layout` was computed with; the view zooms around its centre.
	#[prop(default = RadialLayout::default())]
	geometry: RadialLayout,
	/// Zoom limits and transition timing.
	#[prop(default = ViewportConfig::default())]
	viewport: ViewportConfig,
	/// Fixed canvas width; the parent's width when absent.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height; the parent's height when absent.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let cursor = RwSignal::new("grab");
	let scene = Rc::new(Scene::new(cursor));
	// Window listeners only live while a drag is in progress.
	let drag_listeners: Arc<Mutex<Vec<WindowListenerHandle>>> = Arc::default();

	let scene_init = scene.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("knowledge graph: canvas has no 2d context");
			return;
		};
		let layout = layout.get();
		debug!(
			"knowledge graph mounted at {w}x{h} with {} nodes",
			layout.nodes.len()
		);
		*scene_init.ctx.borrow_mut() = Some(ctx);
		*scene_init.state.borrow_mut() =
			Some(KnowledgeGraphState::new(layout, &geometry, viewport, w, h));
		scene_init.request_frame();
	});

	let scene_resize = scene.clone();
	let resize = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		scene_resize.with_state(|s| s.resize(w, h));
	});

	let listeners_cleanup = drag_listeners.clone();
	on_cleanup(move || {
		resize.remove();
		detach(&listeners_cleanup);
	});

	let (scene_md, listeners_md) = (scene.clone(), drag_listeners.clone());
	let on_mousedown = move |event: MouseEvent| {
		if event.button() != 0 {
			return;
		}
		event.prevent_default();
		let (px, py) = (event.client_x() as f64, event.client_y() as f64);
		scene_md.with_state(|s| s.viewport.begin_pan(px, py));
		cursor.set("grabbing");
		detach(&listeners_md);

		let scene_move = scene_md.clone();
		let on_move = window_event_listener(ev::mousemove, move |event: MouseEvent| {
			event.prevent_default();
			let (px, py) = (event.client_x() as f64, event.client_y() as f64);
			scene_move.with_state(|s| s.viewport.pan_to(px, py));
		});
		let (scene_up, listeners_up) = (scene_md.clone(), listeners_md.clone());
		let on_up = window_event_listener(ev::mouseup, move |_: MouseEvent| {
			scene_up.with_state(|s| s.viewport.end_pan());
			cursor.set("grab");
			detach(&listeners_up);
		});
		if let Ok(mut handles) = listeners_md.lock() {
			handles.extend([on_move, on_up]);
		}
	};

	let scene_mm = scene.clone();
	let on_mousemove = move |event: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &event);

		let changed = {
			let mut guard = scene_mm.state.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			// While panning, hover is frozen and the window listeners move the view.
			let changed = s.pointer_moved(x, y);
			scene_mm.sync_cursor(s);
			changed
		};
		if changed {
			scene_mm.request_frame();
		}
	};

	let scene_ml = scene.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let changed = scene_ml
			.state
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.pointer_left());
		if changed {
			scene_ml.request_frame();
		}
	};

	let scene_wh = scene.clone();
	let on_wheel = move |event: WheelEvent| {
		event.prevent_default();
		let delta = event.delta_y();
		let point = canvas_ref
			.get_untracked()
			.map(|canvas| canvas_point(&canvas, &event));
		scene_wh.with_state(|s| {
			match point {
				Some((x, y)) => {
					s.wheel_at(x, y, delta);
				}
				None => s.viewport.wheel(delta),
			}
			scene_wh.sync_cursor(s);
		});
	};

	let scene_zi = scene.clone();
	let zoom_in = move |_: MouseEvent| scene_zi.with_state(|s| s.viewport.zoom_in());
	let scene_zo = scene.clone();
	let zoom_out = move |_: MouseEvent| scene_zo.with_state(|s| s.viewport.zoom_out());
	let scene_rs = scene;
	let reset_view = move |_: MouseEvent| {
		scene_rs.with_state(|s| {
			debug!("knowledge graph view reset from {:?}", s.viewport.target());
			s.reset_view();
			scene_rs.sync_cursor(s);
		})
	};

	view! {
		<div
			class="knowledge-graph"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="knowledge-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style=move || format!("display: block; cursor: {};", cursor.get())
			/>
			<div class="graph-controls">
				<button class="graph-control" title="Acercar" on:click=zoom_in>"+"</button>
				<button class="graph-control" title="Alejar" on:click=zoom_out>"−"</button>
				<button class="graph-control" title="Centrar" on:click=reset_view>"⟳"</button>
			</div>
			<div class="graph-help">"Arrastra para mover • Rueda para zoom"</div>
		</div>
	}
}
