use leptos::prelude::*;

use super::detail::truncate_id;
use crate::api::CurrentVisitor;
use crate::error::{Result, VizError};

pub const SESSION_UNAVAILABLE: &str = "Could not load your session info";
pub const SESSION_ERROR: &str = "Error loading current session";

const SUMMARY_ID_CHARS: usize = 12;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum VisitorSummary {
	#[default]
	Loading,
	Loaded {
		short_id: String,
		engagement: String,
		pages: usize,
		time_on_site: String,
	},
	Unavailable(&'static str),
}

impl VisitorSummary {
	pub fn from_result(result: Result<CurrentVisitor>) -> Self {
		match result {
			Ok(v) => VisitorSummary::Loaded {
				short_id: truncate_id(&v.id, SUMMARY_ID_CHARS),
				engagement: format!("{:.1}", v.engagement_score),
				pages: v.page_visits.count(),
				time_on_site: format!("{}s", v.time_on_site),
			},
			Err(VizError::Backend(reason)) => {
				log::info!("no current visitor: {reason}");
				VisitorSummary::Unavailable(SESSION_UNAVAILABLE)
			}
			Err(err) => {
				log::warn!("error loading current visitor: {err}");
				VisitorSummary::Unavailable(SESSION_ERROR)
			}
		}
	}
}

#[component]
pub fn VisitorPanel(visitor: RwSignal<VisitorSummary>) -> impl IntoView {
	view! {
		<div id="current-visitor-info" class="panel current-visitor">
			{move || match visitor.get() {
				VisitorSummary::Loading => view! { <p class="muted">"Loading session..."</p> }.into_any(),
				VisitorSummary::Unavailable(message) => view! { <p class="muted">{message}</p> }.into_any(),
				VisitorSummary::Loaded { short_id, engagement, pages, time_on_site } => view! {
					<div class="visitor-summary">
						<div class="visitor-id">"ID: " {short_id}</div>
						<div>"Engagement: " <strong>{engagement}</strong></div>
						<div>"Pages: " <strong>{pages}</strong></div>
						<div>"Time: " <strong>{time_on_site}</strong></div>
					</div>
				}
				.into_any(),
			}}
		</div>
	}
}
