pub mod data_type;
pub mod detector;

pub use data_type::DataType;
pub use detector::{parse_float, parse_integer, ClassifiedLine, TypeClassifier};
