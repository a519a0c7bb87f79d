pub mod batch;
pub mod errors;
pub mod exact;
pub mod graph;
pub mod io;
pub mod log;
pub mod trigraph;
pub mod utils;

pub mod prelude {
    pub use super::errors::*;
    pub use super::exact::*;
    pub use super::graph::*;
    pub use super::io::*;
    pub use super::trigraph::*;
    pub use super::utils::ContractionSequence;
}

#[cfg(test)]
mod testing;
