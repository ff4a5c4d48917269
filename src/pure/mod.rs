//! Side effect free management of internal window manager state
pub mod geometry;
pub mod monitor;
pub mod registry;
pub mod workspace;

#[doc(inline)]
pub use monitor::{Monitor, MonitorSet};
#[doc(inline)]
pub use registry::{Client, ClientIdx, ClientRegistry};
#[doc(inline)]
pub use workspace::{WorkspaceStore, WorkspaceSwitch};
