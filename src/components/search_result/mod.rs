//! Result list: error and not-found notices, manuscript summaries, reviewer
//! cards and "Clear Selection", filtered by the shared selection.

mod view;
mod view_model;

pub use view::SearchResultList;
pub use view_model::{NOT_AUTHORIZED_MESSAGE, NO_RESULTS_MESSAGE, ResultList, TECHNICAL_ERROR_MESSAGE};
