mod pagination;
mod search_bar;
mod sort_select;
mod status_filter;
mod users_table;

pub use pagination::pagination;
pub use search_bar::search_bar;
pub use sort_select::{SORT_PLACEHOLDER, sort_select};
pub use status_filter::status_filter;
pub use users_table::{EMPTY_TABLE_TEXT, users_table};
