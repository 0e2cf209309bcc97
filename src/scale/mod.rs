pub mod coords;
pub mod linear;
