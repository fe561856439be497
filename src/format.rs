//! Text formatting shared by the list view and the chart tooltip.

use std::collections::HashSet;

use url::form_urlencoded;

use crate::model::{DateRange, Manuscript, Membership, PeriodStats, Person, PersonStats, Scores};

const ACTIVE_STATUS: &str = "Active";

/// Title, names, early career marker and non-active status, space separated.
pub fn person_display_name(person: &Person) -> String {
	let status = match person.status.as_deref() {
		Some(ACTIVE_STATUS) => None,
		Some(status) if !status.is_empty() => Some(format!("({status})")),
		_ => Some("(Unknown status)".to_string()),
	};
	[
		person.title.clone(),
		person.first_name.clone(),
		person.middle_name.clone(),
		person.last_name.clone(),
		person
			.is_early_career_researcher
			.then(|| "(early career reviewer)".to_string()),
		status,
	]
	.into_iter()
	.flatten()
	.filter(|s| !s.is_empty())
	.collect::<Vec<_>>()
	.join(" ")
}

/// First, middle and last names.
pub fn person_full_name(person: &Person) -> String {
	[&person.first_name, &person.middle_name, &person.last_name]
		.into_iter()
		.flatten()
		.filter(|s| !s.is_empty())
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(" ")
}

/// Text in curly quotes.
pub fn quote(text: &str) -> String {
	format!("\u{201c}{text}\u{201d}")
}

/// Resolver link for a DOI.
pub fn doi_url(doi: &str) -> String {
	format!("http://dx.doi.org/{doi}")
}

/// Calendar date part of an ISO timestamp.
pub fn format_date(date: &str) -> String {
	date.get(..10).unwrap_or(date).to_string()
}

/// Start and end dates of an unavailability period.
pub fn format_period_not_available(range: &DateRange) -> String {
	format!(
		"{} - {}",
		range.start_date.as_deref().map(format_date).unwrap_or_default(),
		range.end_date.as_deref().map(format_date).unwrap_or_default()
	)
}

/// Count with its noun, or `None` without a count.
pub fn format_count(count: Option<u32>, singular: &str, plural: &str, suffix: &str) -> Option<String> {
	let count = count?;
	let noun = if count == 1 { singular } else { plural };
	Some(format!("{count} {noun} {suffix}").trim_end().to_string())
}

/// Days to one decimal.
pub fn format_days(days: f64) -> String {
	let unit = if days == 1.0 { "day" } else { "days" };
	format!("{days:.1} {unit}")
}

/// Mean review time and open work for one period.
pub fn format_period_stats(stats: &PeriodStats) -> String {
	let duration = stats.review_duration.as_ref();
	let mean = duration
		.and_then(|d| d.mean)
		.filter(|&mean| mean != 0.0)
		.map(|mean| {
			match format_count(duration.and_then(|d| d.count), "review", "reviews", "") {
				Some(count) => format!("{} (avg over {count})", format_days(mean)),
				None => format_days(mean),
			}
		});
	[
		mean,
		format_count(stats.reviews_in_progress, "review", "reviews", "in progress"),
		format_count(stats.waiting_to_be_accepted, "review", "reviews", "awaiting response"),
		format_count(stats.declined, "review", "reviews", "declined"),
	]
	.into_iter()
	.flatten()
	.collect::<Vec<_>>()
	.join(", ")
}

/// Overall and last-12-months review time lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewTimeStats {
	pub overall: String,
	pub last_12m: String,
}

/// Review time lines, or `None` when there are no stats.
pub fn review_time_stats(stats: Option<&PersonStats>) -> Option<ReviewTimeStats> {
	let period = |p: Option<&PeriodStats>| p.map(format_period_stats).unwrap_or_default();
	let overall = period(stats.and_then(|s| s.overall.as_ref()));
	let last_12m = period(stats.and_then(|s| s.last_12m.as_ref()));
	if overall.is_empty() && last_12m.is_empty() {
		return None;
	}
	let last_12m = if last_12m == overall {
		"see above".to_string()
	} else if last_12m.is_empty() {
		"n/a".to_string()
	} else {
		last_12m
	};
	Some(ReviewTimeStats { overall, last_12m })
}

/// Status as shown in the list.
pub fn format_assignment_status(status: &str) -> String {
	status.to_lowercase()
}

/// Score as a whole percentage.
pub fn format_combined_score(score: f64) -> String {
	format!("{:.0}%", score * 100.0)
}

/// Formatted score, or `None` when it is missing or zero. A zero score means
/// there was not enough data and is not shown.
pub fn format_visible_score(score: Option<f64>) -> Option<String> {
	score.filter(|&score| score > 0.0).map(format_combined_score)
}

/// Every present score, labelled.
pub fn format_score_with_details(scores: &Scores) -> String {
	[
		("combined", scores.combined),
		("keyword", scores.keyword),
		("similarity", scores.similarity),
	]
	.into_iter()
	.filter_map(|(name, score)| score.map(|s| format!("{name}: {}", format_combined_score(s))))
	.collect::<Vec<_>>()
	.join(", ")
}

/// Note printed after the score.
pub fn scores_note(scores: &Scores) -> &'static str {
	match scores.combined {
		Some(combined) if combined != 0.0 => " (max across manuscripts)",
		_ => " Not enough data to calculate a score",
	}
}

/// How a membership is linked from a reviewer card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MembershipLink {
	/// ORCID profile plus a Crossref search.
	Orcid { orcid_url: String, crossref_url: String },
	/// Plain `type: id` text.
	Other(String),
}

/// Link for one membership.
pub fn membership_link(membership: &Membership) -> MembershipLink {
	if membership.member_type != "ORCID" {
		return MembershipLink::Other(format!("{}: {}", membership.member_type, membership.member_id));
	}
	MembershipLink::Orcid {
		orcid_url: format!("http://orcid.org/{}", membership.member_id),
		crossref_url: crossref_search_url(&membership.member_id),
	}
}

/// Crossref search for `query`.
pub fn crossref_search_url(query: &str) -> String {
	let query: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
	format!("http://search.crossref.org/?q={query}")
}

/// Fallback link for reviewers without memberships.
pub fn person_web_search_url(person: &Person) -> String {
	crossref_search_url(&person_full_name(person))
}

/// Union of the subject areas of `manuscripts`.
pub fn extract_all_subject_areas(manuscripts: &[Manuscript]) -> HashSet<String> {
	manuscripts
		.iter()
		.flat_map(|m| m.subject_areas.iter().cloned())
		.collect()
}

/// A manuscript matches when nothing was requested or it shares a subject area.
pub fn has_matching_subject_areas(manuscript: &Manuscript, requested: &HashSet<String>) -> bool {
	requested.is_empty() || manuscript.subject_areas.iter().any(|s| requested.contains(s))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ReviewDuration;

	#[test]
	fn zero_and_missing_scores_are_hidden() {
		assert_eq!(format_visible_score(Some(0.456)).as_deref(), Some("46%"));
		assert_eq!(format_visible_score(Some(0.0)), None);
		assert_eq!(format_visible_score(None), None);
	}

	#[test]
	fn display_name_marks_early_career_and_inactive() {
		let person = Person {
			title: Some("Dr".into()),
			first_name: Some("Ada".into()),
			last_name: Some("Lovelace".into()),
			is_early_career_researcher: true,
			status: Some("Inactive".into()),
			..Person::default()
		};
		assert_eq!(
			person_display_name(&person),
			"Dr Ada Lovelace (early career reviewer) (Inactive)"
		);
		let active = Person {
			first_name: Some("Ada".into()),
			status: Some("Active".into()),
			..Person::default()
		};
		assert_eq!(person_display_name(&active), "Ada");
		let unknown = Person {
			first_name: Some("Ada".into()),
			..Person::default()
		};
		assert_eq!(person_display_name(&unknown), "Ada (Unknown status)");
	}

	#[test]
	fn period_stats_join_present_parts() {
		let stats = PeriodStats {
			review_duration: Some(ReviewDuration {
				mean: Some(12.34),
				count: Some(4),
				..ReviewDuration::default()
			}),
			reviews_in_progress: Some(1),
			declined: Some(0),
			..PeriodStats::default()
		};
		assert_eq!(
			format_period_stats(&stats),
			"12.3 days (avg over 4 reviews), 1 review in progress, 0 reviews declined"
		);
		assert_eq!(format_days(1.0), "1.0 day");
	}

	#[test]
	fn identical_periods_say_see_above() {
		let period = PeriodStats {
			declined: Some(2),
			..PeriodStats::default()
		};
		let stats = PersonStats {
			overall: Some(period.clone()),
			last_12m: Some(period),
		};
		let lines = review_time_stats(Some(&stats)).unwrap();
		assert_eq!(lines.overall, "2 reviews declined");
		assert_eq!(lines.last_12m, "see above");
		assert_eq!(review_time_stats(None), None);
	}

	#[test]
	fn memberships_link_orcid_and_crossref() {
		let orcid = Membership {
			member_type: "ORCID".into(),
			member_id: "0000-0001".into(),
		};
		assert_eq!(
			membership_link(&orcid),
			MembershipLink::Orcid {
				orcid_url: "http://orcid.org/0000-0001".into(),
				crossref_url: "http://search.crossref.org/?q=0000-0001".into(),
			}
		);
		let other = Membership {
			member_type: "Scopus".into(),
			member_id: "42".into(),
		};
		assert_eq!(membership_link(&other), MembershipLink::Other("Scopus: 42".into()));
	}

	#[test]
	fn web_search_url_encodes_the_name() {
		let person = Person {
			first_name: Some("Ada".into()),
			last_name: Some("Lovelace".into()),
			..Person::default()
		};
		assert_eq!(
			person_web_search_url(&person),
			"http://search.crossref.org/?q=Ada+Lovelace"
		);
	}

	#[test]
	fn subject_area_matching() {
		let manuscript = Manuscript {
			subject_areas: vec!["Neuroscience".into()],
			..Manuscript::default()
		};
		assert!(has_matching_subject_areas(&manuscript, &HashSet::new()));
		assert!(has_matching_subject_areas(
			&manuscript,
			&HashSet::from(["Neuroscience".to_string()])
		));
		assert!(!has_matching_subject_areas(
			&manuscript,
			&HashSet::from(["Ecology".to_string()])
		));
	}

	#[test]
	fn dates_keep_the_calendar_part() {
		assert_eq!(format_date("2017-03-01T10:00:00"), "2017-03-01");
		assert_eq!(format_date("2017"), "2017");
	}
}
