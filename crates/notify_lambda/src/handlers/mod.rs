pub mod initiator;
pub mod worker;
