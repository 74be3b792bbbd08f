pub mod dashboard;
pub mod settings;
pub mod state;
pub mod suggest;
