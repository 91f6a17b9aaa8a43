pub mod application;
pub mod claim;
pub mod group;
pub mod identity;

pub use application::{Application, ApplicationProvider, ClaimsProvider};
pub use claim::{Claim, GroupClaim, IdentityClaim};
pub use group::{Group, IdentityGroup};
pub use identity::{ApplicationIdentity, ApplicationOwnership, Identity, IdentityType, Profile};
