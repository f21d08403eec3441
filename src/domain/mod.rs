//! Domain logic - pure version rules independent of manifests and git

pub mod channel;
pub mod pep440;
pub mod transition;
pub mod version;

pub use channel::{Channel, RenderStyle};
pub use pep440::Pep440Version;
pub use transition::{
    available_targets, is_channel_downgrade, next_from_parts, next_version, ReleaseRequest,
    ReleaseSize, ReleaseTarget,
};
pub use version::VersionParts;
