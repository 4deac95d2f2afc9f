pub mod application;
pub mod ports;
#[cfg(test)]
pub(crate) mod testing;
pub mod tokener;
pub mod user;
