//! HTTP collaborator for the commuting endpoint

mod client;
mod endpoint;
mod traits;

pub use client::HttpCommutingClient;
pub use endpoint::commuting_endpoint;
pub use traits::CommutingApi;

#[cfg(test)]
pub use traits::MockCommutingApi;
