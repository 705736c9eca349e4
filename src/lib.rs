#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "A single shared to-do list behind a static-credential login. The crate holds the"]
#![doc = "token service, the auth gate middleware, the task stores, the HTTP routes and a"]
#![doc = "small API client. The `taskgate` binary (`main.rs`) wires them into a server."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::routes::ApiContext;
