//! Data types shared by the table engine.

mod column;
mod header;
mod options;
mod row;
mod scroll;

pub use column::*;
pub use header::*;
pub use options::*;
pub use row::*;
pub use scroll::*;
