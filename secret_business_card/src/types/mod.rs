pub mod contract;
pub mod tx;
