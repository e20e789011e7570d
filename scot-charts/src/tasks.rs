// List the different tasks here
pub mod charts;
pub mod legends;
pub mod pdf;
pub mod runner;
