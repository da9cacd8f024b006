pub mod entities;
pub mod forms;
pub mod outcome;
pub mod routes;
pub mod session;
