pub mod linear_rec;
pub mod ntt;
pub mod num_mod;
pub mod poly;
pub mod prime;
pub mod rational;
