pub mod artificial_viscosity;
pub mod boundary;
pub mod cfl;
pub mod euler1d;
pub mod finite_difference;
pub mod mesh;
