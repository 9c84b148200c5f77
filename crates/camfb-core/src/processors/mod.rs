pub mod functional;
pub mod sequential;
