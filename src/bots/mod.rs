pub mod human;
pub mod machine;

pub use human::HumanBot;
pub use machine::MachineBot;
