pub mod parameters;
pub mod state;
pub mod trajectory;
