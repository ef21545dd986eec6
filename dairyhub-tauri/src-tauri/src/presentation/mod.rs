#[cfg(feature = "desktop")]
pub mod commands;
pub mod dto;
pub mod handlers;
#[cfg(feature = "desktop")]
pub mod ipc;
