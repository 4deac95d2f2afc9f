pub mod authorizer;
pub mod jwt;
