pub mod reddit;
pub mod source;
pub mod transport;
