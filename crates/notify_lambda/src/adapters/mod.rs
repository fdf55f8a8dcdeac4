pub mod clock;
pub mod orchestrator;
pub mod webhook;
