pub mod awards;
pub mod roster;
