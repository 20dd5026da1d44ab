pub mod profile;
pub mod subscription;

pub use profile::Profile;
pub use subscription::{Subscription, SubscriptionRow};
