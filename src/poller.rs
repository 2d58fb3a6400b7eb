//! Periodic loading of graph snapshots and stats.
//!
//! Every load is an independent task: a slow response for an older poll may
//! land after a newer one and is applied anyway (last completed wins).

use std::future::Future;

use gloo_timers::callback::Interval;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::config::MIN_POLL_INTERVAL_MS;
use crate::context::VizContext;
use crate::error::{Result, VizError};

/// Logs a failed load; whatever was displayed before stays on screen.
pub fn report_error(what: &str, err: &VizError) {
	warn!("error loading {what}: {err}");
}

/// Runs `task` on the local executor and hands its result to `on_ok`, or
/// to [`report_error`] when it fails.
pub fn spawn_request<T, F>(what: &'static str, task: F, on_ok: impl FnOnce(T) + 'static)
where
	T: 'static,
	F: Future<Output = Result<T>> + 'static,
{
	spawn_local(async move { finish_request(what, task.await, on_ok) });
}

/// Routes a completed load to `on_ok`, or logs it when it failed.
fn finish_request<T>(what: &str, result: Result<T>, on_ok: impl FnOnce(T)) {
	match result {
		Ok(value) => on_ok(value),
		Err(err) => report_error(what, &err),
	}
}

/// Issues one graph-snapshot load and one stats load.
pub fn load_now(ctx: &VizContext) {
	let (api, graph_ctx) = (ctx.api.clone(), ctx.clone());
	spawn_request(
		"network data",
		async move { api.network().await },
		move |data| graph_ctx.apply_snapshot(data),
	);

	let (api, stats_ctx) = (ctx.api.clone(), ctx.clone());
	spawn_request(
		"stats",
		async move { api.stats().await },
		move |stats| stats_ctx.apply_stats(&stats),
	);
}

/// Keeps the interval alive; polling stops when this is dropped.
pub struct PollHandle {
	_interval: Interval,
}

/// Loads immediately, then again every `poll_interval_ms` regardless of
/// whether earlier requests have finished.
pub fn start(ctx: &VizContext) -> PollHandle {
	let period = ctx.config.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
	info!("polling backend every {period} ms");
	load_now(ctx);
	let tick_ctx = ctx.clone();
	PollHandle {
		_interval: Interval::new(period, move || load_now(&tick_ctx)),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn completed_load_reaches_handler() {
		let seen = Cell::new(None);
		finish_request("stats", Ok(7), |v| seen.set(Some(v)));
		assert_eq!(seen.get(), Some(7));
	}

	#[test]
	fn failed_load_keeps_previous_data() {
		let seen = Cell::new(0);
		let failure: Result<i32> = Err(VizError::Status {
			path: "/api/network".into(),
			status: 500,
		});
		finish_request("network data", failure, |v| seen.set(v));
		assert_eq!(seen.get(), 0);
	}
}
