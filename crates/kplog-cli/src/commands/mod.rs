pub mod demo;
pub mod mask;
