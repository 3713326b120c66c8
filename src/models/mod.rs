pub mod credentials;
pub mod dashboard;
pub mod settings;
pub mod table;
pub mod workflow;

pub use credentials::*;
pub use dashboard::*;
pub use settings::*;
pub use table::*;
pub use workflow::*;
