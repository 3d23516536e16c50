pub mod cache;
pub mod comment_service;
pub mod configuration;
pub mod domain;
pub mod envelope;
pub mod existence;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
