#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the TaskNest API: credential"]
#![doc = "hashing, dual-purpose token issuance and verification, the authentication-gate"]
#![doc = "middleware, the account lifecycle (register, verify, login), and the"]
#![doc = "ownership-scoped task operations. It is used by the main binary (`main.rs`)"]
#![doc = "to construct and run the application."]

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
