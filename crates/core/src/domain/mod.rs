pub mod region;
pub mod result;
