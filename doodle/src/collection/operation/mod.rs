mod read_operations;
mod write_operations;
mod write_result;

pub(crate) use read_operations::*;
pub(crate) use write_operations::*;
pub use write_result::*;
