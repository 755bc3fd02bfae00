pub mod fetch;
pub mod load;
pub mod lookup;
pub mod process;
pub mod session;

pub use fetch::{fetch_csv, FetchError};
pub use lookup::Lookup;
pub use process::{parse_records, LoadError, PersonRecord, PersonTable};
