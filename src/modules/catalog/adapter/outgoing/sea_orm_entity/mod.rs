pub mod categories;
pub mod sub_categories;
