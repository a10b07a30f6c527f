pub mod config;
pub mod dataset;
pub mod extract;
pub mod geo;
pub mod portal;
pub mod record;
pub mod run;
