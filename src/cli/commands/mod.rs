pub mod admin;
pub mod entitlement;
pub mod migrate;
pub mod token;
