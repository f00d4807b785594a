//! Quote lifecycle backend for a home-services marketplace.
//!
//! The engine lives in [`services`]; [`routes`] exposes it over HTTP.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod routes;
pub mod seed;
pub mod services;
