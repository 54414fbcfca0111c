//! Batch output writers.

use clap::ValueEnum;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

use crate::person::Person;
use crate::session::Batch;
use crate::SynthError;

/// Output format for generated batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of households.
    #[default]
    Json,
    /// One CSV row per person.
    Csv,
}

/// Flat CSV view of a person.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRecord<'a> {
    household: usize,
    id: String,
    given_name: &'a str,
    surname: &'a str,
    gender: &'static str,
    birthday: String,
    email: &'a str,
    street_number: u32,
    street_name: &'a str,
    street_type: &'a str,
    city: &'a str,
    province: &'a str,
    country: &'a str,
    postal_code: &'a str,
}

impl<'a> CsvRecord<'a> {
    fn new(household: usize, person: &'a Person) -> Self {
        Self {
            household,
            id: person.id.to_string(),
            given_name: &person.given_name,
            surname: &person.surname,
            gender: person.gender.as_str(),
            birthday: person.birthday.format("%Y-%m-%d").to_string(),
            email: &person.email,
            street_number: person.address.street_number,
            street_name: &person.address.street_name,
            street_type: &person.address.street_type,
            city: &person.address.city,
            province: &person.address.province,
            country: &person.address.country,
            postal_code: &person.address.postal_code,
        }
    }
}

pub fn write_batch<W: Write>(batch: &Batch, format: OutputFormat, writer: W) -> Result<(), SynthError> {
    match format {
        OutputFormat::Json => write_json(batch, writer),
        OutputFormat::Csv => write_csv(batch, writer),
    }
}

pub fn write_json<W: Write>(batch: &Batch, mut writer: W) -> Result<(), SynthError> {
    serde_json::to_writer_pretty(&mut writer, &batch.households)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(batch: &Batch, writer: W) -> Result<(), SynthError> {
    let mut writer = Writer::from_writer(writer);
    for household in &batch.households {
        for person in &household.members {
            writer.serialize(CsvRecord::new(household.index, person))?;
        }
    }
    writer.flush()?;
    Ok(())
}
