pub mod apply;
pub mod export;
pub mod init;
pub mod layers;
pub mod new;
pub mod scope;

pub use apply::{apply, ApplyArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use layers::{layers, LayersArgs};
pub use new::{new, NewArgs};
pub use scope::{scope, ScopeArgs};
