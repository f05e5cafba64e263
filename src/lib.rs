pub mod chain;
pub mod digits;
pub mod error;
pub mod graph;
pub mod io_utils;
pub mod series;

pub use chain::{generate_chain, Chain, ChainStatus};
pub use digits::{is_palindrome, parse_seed, reverse_number};
pub use error::{LychrelError, Result};
pub use graph::{build_graph, GraphConfig, GraphExport, GraphNode, ReverseAddGraph};
pub use series::{count_range, SeedSteps, SeriesConfig, SeriesResults};
