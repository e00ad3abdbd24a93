pub mod domain;
pub mod pagination;
pub mod repository;

#[cfg(feature = "server")]
mod app;
#[cfg(feature = "server")]
pub mod datatable;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use app::{configure, run};
