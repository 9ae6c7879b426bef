mod value_utils;

pub use value_utils::*;
