use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::{InputEvent, PanelContent};
use super::render;
use super::state::GraphState;
use super::types::GraphModel;

type SharedState = Rc<RefCell<Option<GraphState>>>;

#[component]
pub fn CastGraphCanvas(
	model: GraphModel,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	// Session-static pieces: autocomplete options and the reactive bits the
	// view reads (panel content, search text).
	let search_options = model.search_options();
	let panel = RwSignal::new(Option::<PanelContent>::None);
	let query = RwSignal::new(String::new());
	let model = StoredValue::new(model);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(GraphState::new(model.get_value(), w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// The registered per-step callback: tick, then redraw links,
		// markers and labels from the updated node set.
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(x, y);
			sync_panel(s, panel);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			// A click (node or background) also clears the search box.
			if s.pointer_up(x, y) {
				query.set(String::new());
			}
			sync_panel(s, panel);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_left();
			sync_panel(s, panel);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom(factor, x, y);
		}
	};

	let state_si = state.clone();
	let on_search_input = move |ev: ev::Event| {
		let value = event_target_value(&ev);
		if let Some(ref mut s) = *state_si.borrow_mut() {
			s.apply_event(InputEvent::SearchChange(value.clone()));
			sync_panel(s, panel);
		}
		query.set(value);
	};

	let state_sc = state.clone();
	let on_search_click = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_sc.borrow_mut() {
			s.apply_event(InputEvent::SearchChange(String::new()));
			sync_panel(s, panel);
		}
		query.set(String::new());
	};

	view! {
		<div class="cast-graph">
			<div class="graph-toolbar">
				<input
					id="search"
					type="search"
					placeholder="Search shows and cast"
					list="search-options"
					prop:value=move || query.get()
					on:input=on_search_input
					on:click=on_search_click
				/>
				<datalist id="search-options">
					{search_options
						.into_iter()
						.map(|name| view! { <option value=name /> })
						.collect_view()}
				</datalist>
			</div>
			<canvas
				node_ref=canvas_ref
				class="cast-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || panel.get().map(info_card)}
		</div>
	}
}

/// Pointer position relative to the canvas.
fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Pushes the highlight's panel content into the view signal when it
/// actually changed.
fn sync_panel(state: &GraphState, panel: RwSignal<Option<PanelContent>>) {
	let current = state.highlight.panel.clone();
	if panel.with_untracked(|p| *p != current) {
		panel.set(current);
	}
}

fn info_card(content: PanelContent) -> impl IntoView {
	match content {
		PanelContent::Show {
			name,
			cast,
			genre,
			description,
		} => view! {
			<div class="info-card">
				<div class="info-card-title">
					<h1>{name}</h1>
				</div>
				<div class="info-card-section">
					<strong>"Cast: "</strong>
					{cast}
				</div>
				<div class="info-card-section">
					<strong>"Genre: "</strong>
					{genre}
				</div>
				<div class="info-card-section">
					<strong>"Plot: "</strong>
					{description}
				</div>
			</div>
		}
		.into_any(),
		PanelContent::Cast { id, shows } => view! {
			<div class="info-card">
				<div class="info-card-title">
					<h1>{id}</h1>
				</div>
				<p>
					<strong>"Shows Acted: "</strong>
					{shows.join(", ")}
				</p>
			</div>
		}
		.into_any(),
	}
}
