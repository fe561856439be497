//! UI components.

pub mod auth_status;
pub mod force_graph;
pub mod search_form;
pub mod search_result;
