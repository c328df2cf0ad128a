pub mod chart;
pub mod signals;
pub mod snapshot;
pub mod trading;

pub use chart::*;
pub use signals::*;
pub use snapshot::*;
pub use trading::*;
