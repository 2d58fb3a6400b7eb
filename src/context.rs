//! Application context shared by the page's components.
//!
//! Built once by the page and handed to every component that needs it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;

use crate::api::{ApiClient, Stats};
use crate::components::force_graph::{AnimationFrame, ForceGraphState, GraphData, Ticker};
use crate::components::panels::{DetailContent, StatsDisplay, VisitorSummary, render_details};
use crate::config::VizConfig;
use crate::poller::{self, PollHandle};

#[derive(Clone)]
pub struct VizContext {
	pub config: Rc<VizConfig>,
	pub api: ApiClient,
	pub graph: Rc<RefCell<ForceGraphState>>,
	pub ticker: Rc<Ticker<AnimationFrame>>,
	pub stats: RwSignal<StatsDisplay>,
	pub details: RwSignal<Option<DetailContent>>,
	pub visitor: RwSignal<VisitorSummary>,
	poll: Rc<RefCell<Option<PollHandle>>>,
}

impl VizContext {
	pub fn new(config: VizConfig) -> Self {
		let graph = ForceGraphState::new(config.simulation.clone(), config.width, config.height);
		Self {
			api: ApiClient::new(config.api_base.clone()),
			graph: Rc::new(RefCell::new(graph)),
			ticker: Rc::new(Ticker::new(AnimationFrame::default())),
			stats: RwSignal::new(StatsDisplay::default()),
			details: RwSignal::new(None),
			visitor: RwSignal::new(VisitorSummary::default()),
			poll: Rc::new(RefCell::new(None)),
			config: Rc::new(config),
		}
	}

	/// Rebuilds the scene, resets the engine and schedules frames.
	pub fn apply_snapshot(&self, data: GraphData) {
		info!(
			"snapshot: {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);
		self.graph.borrow_mut().load_snapshot(data);
		self.ticker.wake();
	}

	pub fn apply_stats(&self, stats: &Stats) {
		self.stats.set(StatsDisplay::from(stats));
	}

	/// Renders the node at `idx` of the current snapshot into the detail panel.
	pub fn show_details(&self, idx: usize) {
		let graph = self.graph.borrow();
		if let Some(node) = graph.node(idx) {
			let content = render_details(node, &graph.snapshot, &self.config.date_format);
			self.details.set(Some(content));
		}
	}

	/// One-shot load of the viewing session's visitor.
	pub fn load_current_visitor(&self) {
		let (api, visitor) = (self.api.clone(), self.visitor);
		leptos::task::spawn_local(async move {
			visitor.set(VisitorSummary::from_result(api.current_visitor().await));
		});
	}

	/// Starts polling, unless it already runs.
	pub fn start(&self) {
		if start_once(&self.poll, || poller::start(self)) {
			self.load_current_visitor();
		}
	}
}

/// Fills `slot` with `start()` if it is empty; returns whether it ran.
fn start_once<T>(slot: &RefCell<Option<T>>, start: impl FnOnce() -> T) -> bool {
	if slot.borrow().is_some() {
		return false;
	}
	let value = start();
	*slot.borrow_mut() = Some(value);
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_only_once() {
		let slot = RefCell::new(None);
		let mut runs = 0;
		assert!(start_once(&slot, || {
			runs += 1;
			"poll"
		}));
		assert!(!start_once(&slot, || {
			runs += 1;
			"poll again"
		}));
		assert_eq!(runs, 1);
		assert_eq!(*slot.borrow(), Some("poll"));
	}
}
