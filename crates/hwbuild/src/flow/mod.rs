//! Phase sequencing: clean, hardware build, simulation.

mod orchestrator;
mod request;
pub mod sim;
mod stage;

pub use orchestrator::BuildOrchestrator;
pub use request::BuildRequest;
pub use stage::Stage;
