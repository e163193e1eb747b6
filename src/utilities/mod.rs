pub mod ct;
pub mod drng;
pub mod le_bytes;
