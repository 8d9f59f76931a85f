pub mod config;
pub mod server;
pub mod util;

pub use config::{BindAddr, ServerConfig};
pub use server::Server;
