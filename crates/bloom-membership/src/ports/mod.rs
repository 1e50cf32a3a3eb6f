//! Ports Layer
//!
//! Defines the interface (trait) a transport collaborator drives. There are
//! no driven ports: the filter lives purely in memory.

pub mod inbound;

pub use inbound::MembershipFilterApi;
