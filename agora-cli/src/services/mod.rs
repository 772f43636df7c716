pub mod image;
pub mod prompt;
pub mod session;
