pub mod products;
pub mod submission;
