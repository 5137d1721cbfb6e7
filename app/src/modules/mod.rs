pub mod carrapato;
pub mod common;
