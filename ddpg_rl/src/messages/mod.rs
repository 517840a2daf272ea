//! Message types for the controller thread.

pub mod policy_msg;

pub use policy_msg::PolicyMsg;
