//! Learning domain rules
//!
//! Progress arithmetic, the step status lifecycle and resource dispatch.
//! Nothing here performs I/O.

pub mod content;
pub mod lifecycle;
pub mod progress;

pub use content::{FormatFilter, RenderedResource, dispatch, select};
pub use lifecycle::StepAction;
pub use progress::{percentage, progress_after, progress_of, reconcile};
