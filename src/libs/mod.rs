pub mod names;
pub mod pairing;
pub mod phylo;
