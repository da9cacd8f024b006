pub mod entities;
pub mod forms;
