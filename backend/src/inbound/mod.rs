//! Inbound adapters driving the domain.

pub mod http;
pub mod ws;
