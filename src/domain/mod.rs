//! Domain modules (vertical slices): request variants, wire types, sub-clients.

pub mod account;
pub mod market;
pub mod order;
pub mod request;
