//! Hover tooltip content. Built lazily for the hovered node only.

use super::types::GraphNode;
use crate::format::{format_date, person_full_name};
use crate::model::Manuscript;

/// Text of a manuscript tooltip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
	pub title: Option<String>,
	pub manuscript_id: Option<String>,
	pub published: Option<String>,
	pub authors: Vec<String>,
	pub subject_areas: Vec<String>,
}

impl TooltipContent {
	/// Tooltip for `manuscript`.
	pub fn from_manuscript(manuscript: &Manuscript) -> Self {
		Self {
			title: manuscript.title.clone(),
			manuscript_id: manuscript.manuscript_id.clone(),
			published: manuscript.published_date.as_deref().map(format_date),
			authors: manuscript.authors.iter().map(person_full_name).collect(),
			subject_areas: manuscript.subject_areas.clone(),
		}
	}

	/// Rendered text lines, empty sections omitted.
	pub fn lines(&self) -> Vec<String> {
		let mut lines = Vec::new();
		if let Some(title) = &self.title {
			lines.push(title.clone());
		}
		match (&self.manuscript_id, &self.published) {
			(Some(id), Some(date)) => lines.push(format!("{id} ({date})")),
			(Some(id), None) => lines.push(id.clone()),
			(None, Some(date)) => lines.push(date.clone()),
			(None, None) => {}
		}
		if !self.authors.is_empty() {
			lines.push(self.authors.join(", "));
		}
		if !self.subject_areas.is_empty() {
			lines.push(self.subject_areas.join(", "));
		}
		lines
	}
}

/// Tooltip content for a node; only manuscript nodes have one.
pub fn tooltip_for_node(node: &GraphNode) -> Option<TooltipContent> {
	node.manuscript().map(TooltipContent::from_manuscript)
}
