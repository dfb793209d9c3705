pub mod config;
pub mod cycle;
pub mod reveal;
pub mod run;
