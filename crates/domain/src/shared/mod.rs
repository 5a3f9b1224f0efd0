pub mod entity;
pub mod validation;
