pub mod line;
pub mod line_type;
pub mod range_set;
pub mod conf;

pub use line::Line;
pub use line_type::LineType;
pub use range_set::RangeSet;
pub use conf::Conf;
