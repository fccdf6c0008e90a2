pub mod api;
pub mod colors;
pub mod fleet;
pub mod format;
pub mod identity;
pub mod leaderboard;
pub mod stats;
pub mod view;

pub use fleet::*;
pub use identity::*;
pub use leaderboard::*;
pub use stats::*;
pub use view::*;
