pub mod summary;
pub mod table;

pub use summary::{summarize, ErrorBarKind, GroupSummary, Statistic};
pub use table::{coerce_numeric, retain_numeric, Column, LongRecord, WideTable};
