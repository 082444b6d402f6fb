pub mod journal;
pub mod log;
pub mod reconcile;
pub mod scheduler;
pub mod session;
pub mod start;
pub mod startup;
pub mod summary;
pub mod timer;
