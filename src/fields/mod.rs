pub mod sike;
