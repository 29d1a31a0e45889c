//! TUI screen implementations.

pub mod help;
pub mod home;
pub mod product_form;

pub use help::{HelpState, draw_help};
pub use home::{HomeState, draw_home};
pub use product_form::{ProductFormState, draw_product_form};
