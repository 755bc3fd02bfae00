// src/load.rs
//! Fetch + parse, with the user-facing message when either step fails.

use anyhow::Result;
use reqwest::blocking::Client;
use std::io::{self, Write};
use tracing::{error, info};

use crate::fetch::fetch_csv;
use crate::process::{error_log::RowErrorSink, parse_records, PersonTable};

/// The line shown when the source can't be fetched or parsed.
pub fn failure_message(url: &str) -> String {
    format!(
        "Something went wrong, you entered in <{}>, please check your url param for errors",
        url
    )
}

fn fetch_and_parse<S: RowErrorSink + ?Sized>(
    client: &Client,
    url: &str,
    sink: &mut S,
) -> Result<PersonTable> {
    let bytes = fetch_csv(client, url)?;
    parse_records(&bytes, sink).map_err(anyhow::Error::from)
}

/// Build the table from `url`. On a fetch or load failure the cause is logged,
/// [`failure_message`] is written to `out`, and `None` comes back so the caller
/// can stop before the lookup session starts.
pub fn load_table<S: RowErrorSink + ?Sized, W: Write>(
    client: &Client,
    url: &str,
    sink: &mut S,
    mut out: W,
) -> io::Result<Option<PersonTable>> {
    match fetch_and_parse(client, url, sink) {
        Ok(table) => {
            info!(people = table.len(), "ready for lookups");
            Ok(Some(table))
        }
        Err(err) => {
            error!("{:#}", err);
            writeln!(out, "{}", failure_message(url))?;
            out.flush()?;
            Ok(None)
        }
    }
}
