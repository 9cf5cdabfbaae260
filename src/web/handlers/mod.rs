//! Request handlers for the Pageforge web API.

pub mod auth;
pub mod export;
pub mod generate;
pub mod pages;
pub mod share;
