pub mod forecast;
pub mod outlook;
pub mod sensitivity;
