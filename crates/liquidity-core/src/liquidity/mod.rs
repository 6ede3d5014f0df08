pub mod ratios;
pub mod status;
