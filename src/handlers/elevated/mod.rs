// handlers/elevated/mod.rs - admin-only endpoints, mounted behind `require_admin`

pub mod entitlements;
