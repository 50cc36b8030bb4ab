pub mod pet;
pub mod vaccine;
