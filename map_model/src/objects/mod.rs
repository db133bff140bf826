pub mod junction;
pub mod segment;
pub mod turn;
