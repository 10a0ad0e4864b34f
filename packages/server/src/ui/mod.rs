//! Social backend server implementation.

mod error;
mod handler;
mod middleware;
mod server;
mod signal;
mod state;

pub use server::Server;
