use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::panels::{Controls, DetailPanel, StatsPanel, VisitorPanel};
use crate::config::VizConfig;
use crate::context::VizContext;

/// Live visitor graph with its stats, session and detail panels.
#[component]
pub fn Home() -> impl IntoView {
	let ctx = VizContext::new(VizConfig::from_location());
	let (stats, details, visitor) = (ctx.stats, ctx.details, ctx.visitor);

	view! {
		<div class="visitor-web">
			<header class="graph-overlay">
				<h1>"Visitor Web"</h1>
				<p class="subtitle">"Drag nodes to move them. Click a node for details."</p>
			</header>
			<StatsPanel stats=stats />
			<div class="visitor-web-main">
				<ForceGraphCanvas ctx=ctx.clone() />
				<aside class="side-panels">
					<h3>"Your session"</h3>
					<VisitorPanel visitor=visitor />
					<h3>"Node details"</h3>
					<DetailPanel details=details />
				</aside>
			</div>
			<Controls ctx=ctx />
		</div>
	}
}
