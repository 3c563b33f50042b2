use leptos::prelude::*;

use crate::components::cast_graph::{CastGraphCanvas, LinkRecord, ShowRecord, build_graph};

fn show(name: &str, genre: &str, description: &str, cast: Option<&str>) -> ShowRecord {
	ShowRecord {
		name: name.into(),
		genre: genre.into(),
		description: description.into(),
		cast: cast.map(Into::into),
	}
}

fn link(source: &str, target: &str) -> LinkRecord {
	LinkRecord {
		source: source.into(),
		target: target.into(),
	}
}

/// Session dataset standing in for the external loader: the entity table
/// and the relationship table, already parsed.
fn sample_shows() -> Vec<ShowRecord> {
	vec![
		show(
			"Breaking Bad",
			"Crime drama",
			"A chemistry teacher diagnosed with cancer starts cooking methamphetamine.",
			Some("Bryan Cranston, Aaron Paul, Bob Odenkirk, Giancarlo Esposito, Jonathan Banks"),
		),
		show(
			"Better Call Saul",
			"Crime drama",
			"A small-time lawyer slides toward becoming the man who defends cartels.",
			Some("Bob Odenkirk, Rhea Seehorn, Jonathan Banks, Giancarlo Esposito"),
		),
		show(
			"The Office",
			"Comedy",
			"Documentary crew follows the everyday lives of paper-company employees.",
			Some("Steve Carell, John Krasinski, Jenna Fischer, Rashida Jones"),
		),
		show(
			"Parks and Recreation",
			"Comedy",
			"An optimistic bureaucrat tries to make her small town a better place.",
			Some("Amy Poehler, Rashida Jones, Chris Pratt, Nick Offerman"),
		),
		show(
			"Community",
			"Comedy",
			"A disbarred lawyer enrolls at a community college and forms a study group.",
			Some("Joel McHale, Donald Glover, Alison Brie"),
		),
		show(
			"The Mandalorian",
			"Space western",
			"A lone bounty hunter protects a mysterious child across the galaxy.",
			Some("Pedro Pascal, Giancarlo Esposito"),
		),
		show(
			"Planet Earth",
			"Documentary",
			"A sweeping natural-history portrait of the planet's wild places.",
			None,
		),
	]
}

fn sample_links() -> Vec<LinkRecord> {
	vec![
		link("Breaking Bad", "Bryan Cranston"),
		link("Breaking Bad", "Aaron Paul"),
		link("Breaking Bad", "Bob Odenkirk"),
		link("Breaking Bad", "Giancarlo Esposito"),
		link("Breaking Bad", "Jonathan Banks"),
		link("Better Call Saul", "Bob Odenkirk"),
		link("Better Call Saul", "Rhea Seehorn"),
		link("Better Call Saul", "Jonathan Banks"),
		link("Better Call Saul", "Giancarlo Esposito"),
		link("The Office", "Steve Carell"),
		link("The Office", "John Krasinski"),
		link("The Office", "Jenna Fischer"),
		link("The Office", "Rashida Jones"),
		link("Parks and Recreation", "Amy Poehler"),
		link("Parks and Recreation", "Rashida Jones"),
		link("Parks and Recreation", "Chris Pratt"),
		link("Parks and Recreation", "Nick Offerman"),
		link("Community", "Joel McHale"),
		link("Community", "Donald Glover"),
		link("Community", "Alison Brie"),
		link("The Mandalorian", "Pedro Pascal"),
		link("The Mandalorian", "Giancarlo Esposito"),
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"The graph could not be built."</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{move || {
					build_graph(&sample_shows(), &sample_links())
						.map(|model| view! { <CastGraphCanvas model=model fullscreen=true /> })
				}}
				<div class="graph-overlay">
					<h1>"Show & Cast Graph"</h1>
					<p class="subtitle">
						"Hover to preview, click to lock, drag to rearrange, search to filter."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
