pub mod heuristic;
pub mod search;

pub use heuristic::{Features, heuristic};
pub use search::{Searcher, children, minimax};
