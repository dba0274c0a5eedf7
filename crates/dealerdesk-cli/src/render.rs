// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use dealerdesk_table::{FieldValue, Record, TableProjection, TableSchema};
use serde_json::{Map, Value, json};
use std::io::Write;

const EMPTY_STATE: &str = "no rows match the current filters";
const MAX_CELL_WIDTH: usize = 28;

pub fn field_json(value: FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text),
        FieldValue::Integer(number) => json!(number),
        FieldValue::Decimal(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FieldValue::Date(date) => Value::String(date.to_string()),
        FieldValue::Missing => Value::Null,
    }
}

pub fn projection_json<R: Record>(
    schema: &TableSchema<R>,
    projection: &TableProjection<'_, R>,
) -> Value {
    let rows: Vec<Value> = projection
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("id".to_owned(), Value::String(row.record_id().to_owned()));
            for field in schema.fields() {
                object.insert(field.key.to_owned(), field_json((field.accessor)(row)));
            }
            Value::Object(object)
        })
        .collect();
    json!({
        "table": schema.name(),
        "page": projection.page.number(),
        "page_size": projection.page.size(),
        "total_pages": projection.total_pages,
        "total_filtered": projection.total_filtered,
        "applied_filters": projection.applied_filter_count,
        "options": projection.options,
        "rows": rows,
    })
}

pub fn write_json<R: Record>(
    out: &mut impl Write,
    schema: &TableSchema<R>,
    projection: &TableProjection<'_, R>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &projection_json(schema, projection))
        .context("encode projection")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_text<R: Record>(
    out: &mut impl Write,
    schema: &TableSchema<R>,
    projection: &TableProjection<'_, R>,
    status: Option<&str>,
) -> Result<()> {
    writeln!(
        out,
        "{}  page {}/{}  {} row(s), {} filter(s) applied",
        schema.name(),
        projection.page.number(),
        projection.total_pages.max(1),
        projection.total_filtered,
        projection.applied_filter_count,
    )?;

    if projection.rows.is_empty() {
        writeln!(out, "{EMPTY_STATE}")?;
    } else {
        let mut header = vec!["ID".to_owned()];
        header.extend(schema.fields().iter().map(|field| field.label.to_owned()));
        let body: Vec<Vec<String>> = projection
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.record_id().to_owned()];
                cells.extend(
                    schema
                        .fields()
                        .iter()
                        .map(|field| clip((field.accessor)(row).display())),
                );
                cells
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|column| {
                std::iter::once(&header)
                    .chain(&body)
                    .map(|cells| cells[column].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_row(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        write_row(out, &rule, &widths)?;
        for cells in &body {
            write_row(out, cells, &widths)?;
        }
    }

    if let Some(status) = status {
        writeln!(out, "status: {status}")?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())?;
    Ok(())
}

fn clip(value: String) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value;
    }
    let mut clipped: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
