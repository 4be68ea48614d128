pub mod error;
pub mod validation;
pub mod model;
pub mod store;
pub mod ops;
pub mod transfer;
pub mod cli;
