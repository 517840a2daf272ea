//! Thread boundary between transports and the controller.

pub mod policy_server;

pub use policy_server::{PolicyHandle, PolicyServer};
