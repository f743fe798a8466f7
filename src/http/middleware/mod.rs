//! Request middleware run before the forwarder.

pub mod authorization;

pub use authorization::require_authorization;
