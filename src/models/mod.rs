pub mod intervention;
pub mod sentiment;
pub mod student;
pub mod verdict;

pub use intervention::*;
pub use sentiment::*;
pub use student::*;
pub use verdict::*;
