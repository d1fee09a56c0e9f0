pub mod any;
pub mod text;
