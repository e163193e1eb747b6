pub mod basis;
pub mod curve;
pub mod isomorphism;
pub mod point;
pub mod projective_point;
mod strategy;
pub mod three_isogeny_chain;
pub mod torsion_basis;
pub mod two_isogeny_chain;
pub mod x_only_arithmetic;
