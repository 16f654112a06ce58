pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod harvester;
pub mod models;
pub mod places;
