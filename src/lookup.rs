use std::fmt;

use crate::process::{date_parser::format_birthdate, PersonRecord, PersonTable};

pub const NOT_FOUND: &str = "No user found with that id";

/// Result of looking an id up in a [`PersonTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found {
        id: &'a str,
        record: &'a PersonRecord,
    },
    NotFound,
}

impl PersonTable {
    /// Look up `id` exactly as typed; no trimming or numeric normalisation.
    pub fn lookup<'a>(&'a self, id: &'a str) -> Lookup<'a> {
        match self.get(id) {
            Some(record) => Lookup::Found { id, record },
            None => Lookup::NotFound,
        }
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found { id, record } => write!(
                f,
                "Person #<{}> is <{}> with a birthday of <{}>",
                id,
                record.name,
                format_birthdate(&record.birthdate)
            ),
            Lookup::NotFound => f.write_str(NOT_FOUND),
        }
    }
}
