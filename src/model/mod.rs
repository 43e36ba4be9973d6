//! Table row models for learning paths
//!
//! Each submodule mirrors one table in the hosted store. Status and type
//! columns are stored as string tags and surface here as enums.

pub mod path;
pub mod preference;
pub mod resource;
pub mod step;

pub use path::{LearningPath, PathStatus};
pub use preference::{LearningGoal, NewPreference, Preference, PreferredFormat, SkillLevel};
pub use resource::{ResourceType, StepResource, VideoSearch};
pub use step::{PathStep, StepStatus, StepUpdate};
