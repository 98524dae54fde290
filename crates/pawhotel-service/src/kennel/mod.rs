//! Kennel unit provisioning.

pub mod service;

pub use service::KennelService;
