//! Components used to build a transform hierarchy
pub mod children;
pub mod global_transform;
pub mod info;
pub mod local_transform;
pub mod parent;

pub use children::Children;
pub use global_transform::{DirtyFlags, GlobalTransform};
pub use info::Info;
pub use local_transform::LocalTransform;
pub use parent::Parent;
