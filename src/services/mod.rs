pub mod catalog;
pub mod credentials;
pub mod dashboard;
pub mod table_projector;
pub mod table_state;
