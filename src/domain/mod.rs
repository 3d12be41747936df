pub mod api;
pub mod todo;
