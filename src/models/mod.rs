pub mod session_event;
pub mod status;
pub mod summary_row;
