pub mod sidh;
pub mod sidh_parameters;
