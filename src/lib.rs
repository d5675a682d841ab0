pub mod config;
pub mod error;
pub mod flow;
pub mod net;
pub mod policy;
pub mod qos;
pub mod queue;
pub mod report;
pub mod run;
pub mod scenario;
pub mod sim;
pub mod traffic;

pub use error::Error;

#[cfg(test)]
mod test;
