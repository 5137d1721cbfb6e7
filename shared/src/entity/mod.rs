pub mod carrapato;
pub mod localizacao;
