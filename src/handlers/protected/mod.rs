// handlers/protected/mod.rs - endpoints that act on the caller's own session
//
// `subscription` accepts anonymous callers and reports them as not entitled;
// `whoami` sits behind `require_session`.

pub mod subscription;
pub mod whoami;

pub use whoami::whoami;
