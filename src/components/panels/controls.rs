use leptos::prelude::*;

use crate::context::VizContext;
use crate::poller;

const CLEAR_PROMPT: &str = "Are you sure you want to remove all demo visitors?";

fn confirmed(prompt: &str) -> bool {
	web_sys::window()
		.and_then(|w| w.confirm_with_message(prompt).ok())
		.unwrap_or(false)
}

/// Demo visitor buttons. Their results only reach the log; the next poll
/// picks up the change.
#[component]
pub fn Controls(ctx: VizContext) -> impl IntoView {
	let api_add = ctx.api.clone();
	let on_add = move |_| {
		let api = api_add.clone();
		poller::spawn_request("demo visitor", async move { api.add_demo_visitor().await }, |_| {});
	};

	let api_clear = ctx.api.clone();
	let on_clear = move |_| {
		if !confirmed(CLEAR_PROMPT) {
			return;
		}
		let api = api_clear.clone();
		poller::spawn_request("clear visitors", async move { api.clear_visitors().await }, |_| {});
	};

	let on_refresh = move |_| poller::load_now(&ctx);

	view! {
		<div class="panel controls">
			<button class="btn" on:click=on_add>"Add demo visitor"</button>
			<button class="btn btn-danger" on:click=on_clear>"Clear demo visitors"</button>
			<button class="btn" on:click=on_refresh>"Refresh"</button>
		</div>
	}
}
