use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

use crate::context::VizContext;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position in graph space.
fn graph_point(ctx: &VizContext, canvas: &HtmlCanvasElement, ev: &PointerEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	let (x, y) = (
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	);
	ctx.graph.borrow().screen_to_graph(x, y, (rect.width(), rect.height()))
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// Two stacked canvases: the guide backdrop, painted once, and the scene,
/// repainted on every engine step.
#[component]
pub fn ForceGraphCanvas(ctx: VizContext) -> impl IntoView {
	let backdrop_ref = NodeRef::<leptos::html::Canvas>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (w, h) = (ctx.config.width, ctx.config.height);
	let ctx_init = ctx.clone();

	Effect::new(move |_| {
		let (Some(backdrop), Some(canvas)) = (backdrop_ref.get(), canvas_ref.get()) else {
			return;
		};
		let backdrop: HtmlCanvasElement = backdrop.into();
		let canvas: HtmlCanvasElement = canvas.into();
		for c in [&backdrop, &canvas] {
			c.set_width(w as u32);
			c.set_height(h as u32);
		}
		let (Some(mut backdrop_2d), Some(mut scene_2d)) =
			(context_2d(&backdrop), context_2d(&canvas))
		else {
			log::warn!("2d canvas context unavailable");
			return;
		};
		ctx_init.graph.borrow_mut().paint_backdrop(&mut backdrop_2d);

		let (graph_anim, ticker_anim) = (ctx_init.graph.clone(), ctx_init.ticker.clone());
		ctx_init.ticker.source().set_callback(Closure::new(move || {
			ticker_anim.on_tick(|| {
				let mut g = graph_anim.borrow_mut();
				let more = g.tick();
				g.paint(&mut scene_2d);
				if !more {
					log::debug!("layout settled");
				}
				more
			});
		}));
		ctx_init.ticker.wake();
		ctx_init.start();
	});

	let ctx_down = ctx.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = graph_point(&ctx_down, &canvas, &ev);
		if ctx_down.graph.borrow_mut().pointer_down(ev.pointer_id(), at) {
			let _ = canvas.set_pointer_capture(ev.pointer_id());
			set_cursor(&canvas, "grabbing");
			ctx_down.ticker.wake();
		}
	};

	let ctx_move = ctx.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = graph_point(&ctx_move, &canvas, &ev);
		let mut g = ctx_move.graph.borrow_mut();
		g.pointer_move(ev.pointer_id(), at);
		if !g.drag.is_dragging() {
			set_cursor(&canvas, if g.hover.is_some() { "pointer" } else { "grab" });
		}
	};

	let ctx_up = ctx.clone();
	let on_pointerup = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = graph_point(&ctx_up, &canvas, &ev);
		let (clicked, over_node) = {
			let mut g = ctx_up.graph.borrow_mut();
			let clicked = g.pointer_up(ev.pointer_id(), at);
			(clicked, g.hover.is_some())
		};
		let _ = canvas.release_pointer_capture(ev.pointer_id());
		set_cursor(&canvas, if over_node { "pointer" } else { "grab" });
		if let Some(idx) = clicked {
			ctx_up.show_details(idx);
		}
		ctx_up.ticker.wake();
	};

	let ctx_cancel = ctx.clone();
	let on_pointercancel = move |ev: PointerEvent| {
		ctx_cancel.graph.borrow_mut().pointer_cancel(ev.pointer_id());
		ctx_cancel.ticker.wake();
	};

	let ctx_leave = ctx;
	let on_pointerleave = move |_: PointerEvent| {
		ctx_leave.graph.borrow_mut().set_hover(None);
	};

	let size = format!("width: {w}px; height: {h}px;");
	view! {
		<div class="force-graph" style=format!("position: relative; {size}")>
			<canvas
				node_ref=backdrop_ref
				class="force-graph-backdrop"
				style=format!("position: absolute; left: 0; top: 0; {size}")
			/>
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup
				on:pointercancel=on_pointercancel
				on:pointerleave=on_pointerleave
				style=format!("position: absolute; left: 0; top: 0; touch-action: none; {size}")
			/>
		</div>
	}
}
