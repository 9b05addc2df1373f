pub mod corpus;
pub mod generator;
