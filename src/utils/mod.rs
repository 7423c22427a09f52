pub mod csv;
pub mod date;

pub use csv::{CsvParseOutcome, parse_draws_csv};
pub use date::{canonicalize_date, eligibility_cutoff, to_display_date};
