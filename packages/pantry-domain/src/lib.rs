pub mod instructions;
pub mod matcher;
pub mod recipe;
