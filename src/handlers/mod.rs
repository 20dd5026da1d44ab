// handlers/mod.rs - 3-tier handler layout
//
// Public (optional session) → Protected (session required) → Elevated (admin only)
pub mod elevated;
pub mod protected;
pub mod public;
