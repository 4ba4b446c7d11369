//! Things that only run on the server (talking to the catalog API, sessions, config)
//!
//! The browser never calls the catalog directly; every request goes through the server functions
//! of the app, which use the [`catalog::CatalogClient`] kept in the [`config::Config`].
pub mod auth;
pub mod catalog;
pub mod config;
pub mod signal_handler;
