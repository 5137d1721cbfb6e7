pub mod errors;
pub mod string;
