//! View state and the pure transition applied for each user event.

use std::any::Any;

use log::debug;
use rolodex_states::{SnapshotClone, State, state_assign_impl};

use crate::{SortField, UserStatus, UsersQuery};

/// Everything a user can do to the users view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// First frame; loads everything.
    Startup,
    /// Clears search and sort, back to page 1, loads everything.
    Reset,
    /// The search box was edited. Nothing is fetched until submit.
    SearchTextChanged(String),
    SubmitSearch,
    SortSelected(SortField),
    FilterSelected(UserStatus),
    GoToPage(usize),
}

/// Client-local view state. Invariant: `1 <= current_page <= max(1, total_pages)`
/// for every page set through [`ViewState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub sort_field: Option<SortField>,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_field: None,
            current_page: 1,
        }
    }
}

impl ViewState {
    /// Apply `event` and return the fetch it requires, if any.
    ///
    /// `total_pages` is the page count of the currently loaded result set.
    pub fn reduce(&mut self, event: ViewEvent, total_pages: usize) -> Option<UsersQuery> {
        debug!("ViewState::reduce: {event:?}");
        match event {
            ViewEvent::Startup => Some(UsersQuery::All),
            ViewEvent::Reset => {
                self.search_text.clear();
                self.sort_field = None;
                self.current_page = 1;
                Some(UsersQuery::All)
            }
            ViewEvent::SearchTextChanged(text) => {
                self.search_text = text;
                None
            }
            ViewEvent::SubmitSearch => Some(UsersQuery::Search(self.search_text.clone())),
            ViewEvent::SortSelected(field) => {
                self.sort_field = Some(field);
                Some(UsersQuery::Sort(field))
            }
            ViewEvent::FilterSelected(status) => Some(UsersQuery::Filter(status)),
            ViewEvent::GoToPage(page) => {
                self.go_to_page(page, total_pages);
                None
            }
        }
    }

    /// Move to `page` if it exists. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page == 0 || page > total_pages.max(1) {
            debug!("ViewState::go_to_page: {page} outside 1..={total_pages}, ignored");
            return false;
        }
        let changed = self.current_page != page;
        self.current_page = page;
        changed
    }

    /// A fetch for `query` succeeded and replaced the result set.
    pub fn on_results_replaced(&mut self, query: &UsersQuery) {
        self.current_page = 1;
        if query.is_search() {
            self.search_text.clear();
        }
    }
}

impl SnapshotClone for ViewState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for ViewState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let view = ViewState::default();
        assert!(view.search_text.is_empty());
        assert_eq!(view.sort_field, None);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn startup_loads_everything_without_touching_state() {
        let mut view = ViewState::default();
        assert_eq!(view.reduce(ViewEvent::Startup, 1), Some(UsersQuery::All));
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn reset_clears_everything() {
        let mut view = ViewState {
            search_text: "bob".to_owned(),
            sort_field: Some(SortField::Phone),
            current_page: 3,
        };
        assert_eq!(view.reduce(ViewEvent::Reset, 3), Some(UsersQuery::All));
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn typing_does_not_fetch() {
        let mut view = ViewState::default();
        assert_eq!(
            view.reduce(ViewEvent::SearchTextChanged("ali".to_owned()), 1),
            None
        );
        assert_eq!(view.search_text, "ali");
    }

    #[test]
    fn submit_searches_current_text_and_keeps_it_until_success() {
        let mut view = ViewState {
            search_text: "alice".to_owned(),
            ..ViewState::default()
        };
        assert_eq!(
            view.reduce(ViewEvent::SubmitSearch, 1),
            Some(UsersQuery::Search("alice".to_owned()))
        );
        assert_eq!(view.search_text, "alice");
    }

    #[test]
    fn sort_selection_is_remembered() {
        let mut view = ViewState::default();
        assert_eq!(
            view.reduce(ViewEvent::SortSelected(SortField::Address), 1),
            Some(UsersQuery::Sort(SortField::Address))
        );
        assert_eq!(view.sort_field, Some(SortField::Address));
    }

    #[test]
    fn filter_fetches_by_status() {
        let mut view = ViewState::default();
        assert_eq!(
            view.reduce(ViewEvent::FilterSelected(UserStatus::Active), 1),
            Some(UsersQuery::Filter(UserStatus::Active))
        );
    }

    #[test]
    fn go_to_page_in_range() {
        let mut view = ViewState::default();
        assert_eq!(view.reduce(ViewEvent::GoToPage(3), 3), None);
        assert_eq!(view.current_page, 3);
        assert!(!view.go_to_page(3, 3), "same page is not a change");
    }

    #[test]
    fn go_to_page_out_of_range_is_a_no_op() {
        let mut view = ViewState {
            current_page: 2,
            ..ViewState::default()
        };
        for page in [0, 4, 99] {
            view.reduce(ViewEvent::GoToPage(page), 3);
            assert_eq!(view.current_page, 2, "page {page}");
        }
    }

    #[test]
    fn replaced_results_reset_page_and_clear_search_only_for_search() {
        let mut view = ViewState {
            search_text: "draft".to_owned(),
            sort_field: Some(SortField::Name),
            current_page: 2,
        };
        view.on_results_replaced(&UsersQuery::Filter(UserStatus::Inactive));
        assert_eq!(view.current_page, 1);
        assert_eq!(view.search_text, "draft");

        view.current_page = 2;
        view.on_results_replaced(&UsersQuery::Search("draft".to_owned()));
        assert_eq!(view.current_page, 1);
        assert!(view.search_text.is_empty());
        assert_eq!(view.sort_field, Some(SortField::Name));
    }
}
