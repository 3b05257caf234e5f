//! Uniform console rendering for result records.
//!
//! # Responsibility
//! - Give unrelated document types one display operation.
//! - Keep the line format stable: fields in a fixed order, single spaces.
//!
//! # Invariants
//! - `render()` never contains a trailing newline.
//! - Multi-part values (`Record`, `OutboundFlight`) print one line per part.

use std::io::{self, Write};

use crate::model::airport::Airport;
use crate::model::flight::Flight;
use crate::model::meta::{DocumentMeta, OutboundFlight, Record};
use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

/// Anything that can be written to the console as result lines.
pub trait Printable {
    /// Returns the value as text, one line per part.
    fn render(&self) -> String;

    /// Writes the rendered value followed by a newline.
    fn print_to(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.render())
    }
}

/// Prints every item in order.
pub fn print_contents(out: &mut dyn Write, items: &[&dyn Printable]) -> io::Result<()> {
    for item in items {
        item.print_to(out)?;
    }
    Ok(())
}

impl Printable for Airport {
    fn render(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.airport, self.city, self.country, self.lat, self.long, self.state
        )
    }
}

impl Printable for Flight {
    fn render(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {} {} {} {} {}",
            self.arr_time,
            render_timestamp(&self.arr_time_utc),
            self.day_of_month,
            self.day_of_week,
            self.dep_time,
            self.distance,
            self.flight_num,
            self.month,
            self.tail_num,
            self.unique_carrier,
            self.year,
            self.from.as_deref().unwrap_or_default(),
            self.to.as_deref().unwrap_or_default()
        )
    }
}

/// Renders as `2008-01-03 22:51:00 +0000 UTC`.
fn render_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

impl Printable for DocumentMeta {
    fn render(&self) -> String {
        format!("{} {} {}", self.id, self.rev, self.key)
    }
}

impl<T: Printable> Printable for Record<T> {
    fn render(&self) -> String {
        format!("{}\n{}", self.meta.render(), self.document.render())
    }
}

impl Printable for OutboundFlight {
    fn render(&self) -> String {
        format!("{}\n{}", self.airport.render(), self.flight.render())
    }
}
