//! Search criteria form: a manuscript number, or free-text keywords, subject
//! area and abstract.

use leptos::prelude::*;
use web_sys::SubmitEvent;

use crate::api::SearchQuery;

/// Form emitting a `SearchQuery` on submit.
#[component]
pub fn SearchForm(
	on_search: Callback<SearchQuery>,
	#[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
	let (manuscript_no, set_manuscript_no) = signal(String::new());
	let (keywords, set_keywords) = signal(String::new());
	let (subject_area, set_subject_area) = signal(String::new());
	let (abstract_text, set_abstract_text) = signal(String::new());

	// A manuscript number takes precedence over free-text criteria.
	let query = move || {
		let manuscript = SearchQuery::Manuscript(manuscript_no.get());
		if !manuscript.is_empty() {
			return manuscript;
		}
		SearchQuery::Text {
			keywords: keywords.get(),
			subject_area: subject_area.get(),
			abstract_text: abstract_text.get(),
		}
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let query = query();
		if !query.is_empty() {
			on_search.run(query);
		}
	};

	view! {
		<form class="search-form" on:submit=on_submit>
			<label>
				"Manuscript number"
				<input
					type="text"
					prop:value=move || manuscript_no.get()
					on:input=move |ev| set_manuscript_no.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Keywords"
				<input
					type="text"
					prop:value=move || keywords.get()
					on:input=move |ev| set_keywords.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Subject area"
				<input
					type="text"
					prop:value=move || subject_area.get()
					on:input=move |ev| set_subject_area.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Abstract"
				<textarea
					prop:value=move || abstract_text.get()
					on:input=move |ev| set_abstract_text.set(event_target_value(&ev))
				/>
			</label>
			<button type="submit" disabled=move || busy.get()>
				{move || if busy.get() { "Searching..." } else { "Search" }}
			</button>
		</form>
	}
}
