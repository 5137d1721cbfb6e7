pub mod carrapato;
pub mod db;
