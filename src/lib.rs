pub mod calendar;
pub mod commands;
pub mod components;
pub mod config;
pub mod error;
pub mod pagination;
pub mod startup;
pub mod utils;
