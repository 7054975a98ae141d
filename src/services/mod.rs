pub mod excel;
pub mod inspection;
