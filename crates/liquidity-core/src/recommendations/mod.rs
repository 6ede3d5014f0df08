pub mod advice;
pub mod rules;
