use std::fmt;

/// The three coarse types a line can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    Integer,
    Float,
    String,
}

impl DataType {
    /// Every type, in report order.
    pub const ALL: [DataType; 3] = [DataType::Integer, DataType::Float, DataType::String];

    /// Canonical name used for output files and report headings.
    pub fn file_name(&self) -> &'static str {
        match self {
            DataType::Integer => "integers",
            DataType::Float => "floats",
            DataType::String => "strings",
        }
    }

    pub fn output_file_name(&self, prefix: &str) -> String {
        format!("{}{}.txt", prefix, self.file_name())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
