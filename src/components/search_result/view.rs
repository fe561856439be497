//! Leptos views of the result list.

use std::collections::HashSet;
use std::sync::Arc;

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::view_model::ResultList;
use crate::components::force_graph::TooltipContent;
use crate::format::{
	MembershipLink, doi_url, format_assignment_status, format_date, format_period_not_available,
	format_score_with_details, format_visible_score, has_matching_subject_areas, membership_link,
	person_display_name, person_web_search_url, quote, review_time_stats, scores_note,
};
use crate::model::{Manuscript, Person, PotentialReviewer, Scores, SearchResult};
use crate::selection::Selection;

const NBSP: &str = "\u{a0}";

/// Textual view of a search result: notices, manuscript summaries and
/// reviewer cards, filtered by the current selection.
#[component]
pub fn SearchResultList(
	#[prop(into)] search_result: Signal<Option<Arc<SearchResult>>>,
	#[prop(into)] selection: Signal<Selection>,
	on_select_reviewer: Callback<Arc<PotentialReviewer>>,
	on_clear_selection: Callback<()>,
) -> impl IntoView {
	move || {
		let result = search_result.get()?;
		let ResultList {
			error_message,
			not_found_message,
			manuscripts,
			reviewers,
			no_results,
			show_clear_selection,
			requested_subject_areas,
		} = ResultList::new(&result, &selection.get());
		let requested_subject_areas = Arc::new(requested_subject_areas);

		Some(view! {
			<div class="result-list">
				{error_message.map(|message| view! { <div class="error-message">{message}</div> })}
				{not_found_message.map(|message| view! { <div class="error-message">{message}</div> })}
				{manuscripts
					.into_iter()
					.map(|manuscript| view! { <ManuscriptSummary manuscript=manuscript /> })
					.collect_view()}
				{reviewers
					.into_iter()
					.map(|reviewer| {
						view! {
							<PotentialReviewerCard
								reviewer=reviewer
								requested_subject_areas=requested_subject_areas.clone()
								on_select=on_select_reviewer
							/>
						}
					})
					.collect_view()}
				{no_results.map(|message| view! { <div class="error-message">{message}</div> })}
				{show_clear_selection
					.then(|| {
						view! {
							<div class="buttons">
								<button class="clear-selection" on:click=move |_| on_clear_selection.run(())>
									"Clear Selection"
								</button>
							</div>
						}
					})}
			</div>
		})
	}
}

#[component]
fn ManuscriptRefLink(manuscript: Manuscript) -> impl IntoView {
	view! {
		<a class="manuscript-link" target="_blank" href=manuscript.doi.as_deref().map(doi_url)>
			{manuscript.manuscript_id.clone()}
		</a>
	}
}

#[component]
fn PersonList(persons: Vec<Person>) -> impl IntoView {
	let items = persons
		.into_iter()
		.enumerate()
		.map(|(index, person)| {
			let mailto = person.email.as_ref().map(|email| format!("mailto:{email}"));
			let indicator = person.is_corresponding_author.then(|| {
				view! {
					<a class="corresponding-author" target="_blank" href=mailto title=person.email.clone()>
						"\u{2709}"
					</a>
				}
			});
			view! {
				<span class="person">
					{(index > 0).then_some(", ")}
					{person_display_name(&person)}
					{indicator}
				</span>
			}
		})
		.collect_view();
	view! { <span class="person-list">{items}</span> }
}

fn person_section(label: &'static str, persons: &[Person]) -> Option<impl IntoView + use<>> {
	if persons.is_empty() {
		return None;
	}
	let persons = persons.to_vec();
	Some(view! {
		<div class="sub-section">
			<span class="label">{label}</span>
			<PersonList persons=persons />
		</div>
	})
}

#[component]
fn ManuscriptSummary(manuscript: Manuscript) -> impl IntoView {
	let title = quote(manuscript.title.as_deref().unwrap_or_default());
	let abstract_text = quote(manuscript.abstract_text.as_deref().unwrap_or_default());
	let subject_areas = manuscript.subject_areas.join(", ");

	view! {
		<div class="card manuscript-summary">
			<div class="card-header">
				<div class="card-title">{title}</div>
				<div class="card-subtitle">
					<ManuscriptRefLink manuscript=manuscript.clone() />
				</div>
			</div>
			<div class="card-text">
				<div class="sub-section">
					<span class="label">"Authors: "</span>
					<PersonList persons=manuscript.authors.clone() />
				</div>
				{person_section("Reviewers: ", &manuscript.reviewers)}
				{person_section("Editors: ", &manuscript.editors)}
				{person_section("Senior Editors: ", &manuscript.senior_editors)}
			</div>
			<details class="card-text" open=true>
				<summary>"Details"</summary>
				<div class="sub-section">
					<span class="label">"Subject areas: "</span>
					{subject_areas}
				</div>
				<div class="abstract">
					<span class="label">"Abstract:"</span>
					<p>{abstract_text}</p>
				</div>
			</details>
		</div>
	}
}

#[component]
fn ManuscriptInlineSummary(manuscript: Manuscript, score: Option<f64>, matching: bool) -> impl IntoView {
	let tooltip = TooltipContent::from_manuscript(&manuscript).lines().join("\n");
	let title = quote(manuscript.title.as_deref().unwrap_or_default());
	let published = manuscript.published_date.as_deref().map(format_date);
	let alternatives = manuscript
		.alternatives
		.iter()
		.cloned()
		.map(|alternative| view! { ", " <ManuscriptRefLink manuscript=alternative /> })
		.collect_view();
	let class = if matching {
		"manuscript-inline-summary"
	} else {
		"manuscript-inline-summary not-matching-subject-areas"
	};

	view! {
		<div class=class>
			<span class="manuscript-title" title=tooltip>{title}</span>
			" "
			{published}
			" ("
			<ManuscriptRefLink manuscript=manuscript.clone() />
			{alternatives}
			") "
			{format_visible_score(score).map(|score| view! { "- " <span class="score">{score}</span> })}
		</div>
	}
}

fn score_view(scores: &Scores) -> impl IntoView + use<> {
	let title = scores.combined.map(|_| format_score_with_details(scores)).unwrap_or_default();
	let text = format_visible_score(scores.combined).unwrap_or_else(|| NBSP.to_string());
	view! { <span class="score" title=title>{text}</span> }
}

fn membership_views(person: &Person) -> Vec<AnyView> {
	if person.memberships.is_empty() {
		return vec![view! {
			<a class="membership-link" target="_blank" href=person_web_search_url(person) title="Search Crossref">
				"\u{1f50d}"
			</a>
		}
		.into_any()];
	}
	person
		.memberships
		.iter()
		.map(|membership| match membership_link(membership) {
			MembershipLink::Orcid {
				orcid_url,
				crossref_url,
			} => view! {
				<span class="membership">
					<a class="membership-link" target="_blank" href=orcid_url>"ORCID"</a>
					<a class="membership-link" target="_blank" href=crossref_url>"Crossref"</a>
				</span>
			}
			.into_any(),
			MembershipLink::Other(text) => view! { <span class="unrecognised-membership">{text}</span> }.into_any(),
		})
		.collect()
}

fn manuscript_list(
	reviewer: &PotentialReviewer,
	manuscripts: &[Manuscript],
	requested_subject_areas: &HashSet<String>,
) -> impl IntoView + use<> {
	manuscripts
		.iter()
		.map(|manuscript| {
			let score = reviewer.scores.for_manuscript(manuscript);
			let matching = has_matching_subject_areas(manuscript, requested_subject_areas);
			view! { <ManuscriptInlineSummary manuscript=manuscript.clone() score=score matching=matching /> }
		})
		.collect_view()
}

#[component]
fn PotentialReviewerCard(
	reviewer: Arc<PotentialReviewer>,
	requested_subject_areas: Arc<HashSet<String>>,
	on_select: Callback<Arc<PotentialReviewer>>,
) -> impl IntoView {
	let person = reviewer.person.clone().unwrap_or_default();
	let select = {
		let reviewer = reviewer.clone();
		move |_: MouseEvent| on_select.run(reviewer.clone())
	};

	let assignment_status = reviewer
		.assignment_status
		.as_ref()
		.and_then(|status| status.status.as_deref())
		.map(|status| format!(" ({})", format_assignment_status(status)));
	let email = person.email.clone().map(|email| {
		let href = format!("mailto:{email}");
		view! { <a class="email-link" target="_blank" href=href>{email}</a> }
	});
	let not_available = (!person.dates_not_available.is_empty()).then(|| {
		let periods = person
			.dates_not_available
			.iter()
			.map(format_period_not_available)
			.collect::<Vec<_>>()
			.join(", ");
		view! {
			<div class="sub-section">
				<span class="label">"Not Available: "</span>
				<span class="value">{periods}</span>
			</div>
		}
	});
	let review_time = review_time_stats(person.stats.as_ref()).map(|stats| {
		view! {
			<div class="sub-section">
				<span class="label">"Review Time: "</span>
				<div class="value">
					<div>"Overall: " {stats.overall}</div>
					<div>"Last 12 months: " {stats.last_12m}</div>
				</div>
			</div>
		}
	});
	let author_of = (!reviewer.author_of_manuscripts.is_empty()).then(|| {
		view! {
			<div class="sub-section potential_reviewer_author_of">
				<span class="label">"Author of: "</span>
				<div class="value">
					{manuscript_list(&reviewer, &reviewer.author_of_manuscripts, &requested_subject_areas)}
				</div>
			</div>
		}
	});
	let reviewer_of = (!reviewer.reviewer_of_manuscripts.is_empty()).then(|| {
		view! {
			<div class="sub-section potential_reviewer_reviewer_of">
				<span class="label">"Reviewer of: "</span>
				<div class="value">
					{manuscript_list(&reviewer, &reviewer.reviewer_of_manuscripts, &requested_subject_areas)}
				</div>
			</div>
		}
	});
	let score_class = if person.is_early_career_researcher {
		"person-score early-career-researcher-score"
	} else {
		"person-score"
	};

	view! {
		<div class="card potential-reviewer" data-person-id=person.person_id.as_ref().map(ToString::to_string)>
			<div class="card-header">
				<div class="card-title">
					<span class="person-name" on:click=select.clone()>{person_display_name(&person)}</span>
					{assignment_status.map(|status| view! { <span class="assignment-status">{status}</span> })}
					{membership_views(&person)}
				</div>
				<div class="card-subtitle">
					{person.institution.clone()}
					{email}
				</div>
			</div>
			<div class="card-text">
				{not_available}
				{review_time}
				{author_of}
				{reviewer_of}
				<div class="sub-section">
					<span class="label">"Scores: "</span>
					<span class="value" on:click=select>
						<span class=score_class>{score_view(&reviewer.scores)}</span>
						{scores_note(&reviewer.scores)}
					</span>
				</div>
			</div>
		</div>
	}
}
