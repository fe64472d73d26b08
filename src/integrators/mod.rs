pub mod euler;

pub use euler::Euler;
