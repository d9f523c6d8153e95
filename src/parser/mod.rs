pub mod context;
pub mod fountain_parser;
pub mod line_classifier;
pub mod omission_tracker;
pub mod range_annotator;
pub mod second_pass;
pub mod text_processor;

pub use context::ClassificationContext;
pub use fountain_parser::{FountainParser, ParseOutput, ParseSummary};
pub use line_classifier::classify_line;
pub use omission_tracker::{Omission, OmissionTracker};
pub use range_annotator::{annotate, Annotation};
pub use text_processor::split_lines;
