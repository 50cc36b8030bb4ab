pub mod vaccine;
