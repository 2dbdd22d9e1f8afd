pub mod cell;
pub mod grid;
pub mod observer;
pub mod propagate;
