pub mod config;
pub mod listing;
pub mod password;
pub mod role;

pub use listing::{ListQuery, Listable, Page, Pagination, SortOrder, UserListQuery, UserTab};
pub use role::{Landing, Menu, Role};
