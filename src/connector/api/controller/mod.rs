pub mod generate_controller;
pub mod task_controller;

pub use generate_controller::GenerateController;
pub use task_controller::TaskController;
