pub mod extractor;
pub mod handler;
pub mod model;
pub mod route;

#[cfg(test)]
pub(crate) mod testing;
