//! Domain core: entities, services, and the ports that bound the hexagon.
//!
//! Nothing in here knows about HTTP, WebSockets, or Diesel. Inbound adapters
//! call the services; outbound adapters implement the ports.

pub mod account;
pub mod credentials;
mod error;
pub mod feed;
pub mod identity;
pub mod job;
pub mod jobs;
pub mod notification;
pub mod password;
pub mod ports;
pub mod post;
pub mod profile;

pub use error::{Error, ErrorCode, ErrorValidationError};
