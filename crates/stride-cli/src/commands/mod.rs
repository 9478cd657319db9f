pub mod config;
pub mod hint;
pub mod run;
