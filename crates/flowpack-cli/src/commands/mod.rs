pub mod build;
pub mod check;
pub mod dump;
pub mod expr;
pub mod project_loader;

#[cfg(test)]
mod project_loader_tests;
