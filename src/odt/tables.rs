//! Table filling.
//!
//! A table binding addresses a `table:table` structure by its `table:name`
//! attribute and fills it row by row from a rectangular grid. The template
//! grows to the grid's row count by cloning its last row; it never shrinks,
//! so template rows beyond the grid are left untouched. Before anything is
//! written, every bound row is checked against the template row's cell
//! count. Cells are typed by a numeric-literal check on the bound string
//! and carry the value in both the typed attributes and the rendered text.

use crate::common::{BindingKind, Error, Result};
use crate::odt::bindings::Grid;
use crate::odt::constants::{
    ATTR_OFFICE_VALUE, ATTR_OFFICE_VALUE_TYPE, ATTR_TABLE_NAME, TAG_PARAGRAPH, TAG_TABLE,
    TAG_TABLE_CELL, TAG_TABLE_ROW, VALUE_TYPE_FLOAT, VALUE_TYPE_STRING,
};
use crate::odt::element::{Element, Node};
use std::collections::{HashMap, HashSet};

/// Fill every bound table in the document.
///
/// A binding key left unmatched after the full document scan is fatal.
pub(crate) fn fill_tables(doc: &mut Element, tables: &HashMap<String, Grid>) -> Result<()> {
    if tables.is_empty() {
        return Ok(());
    }

    let mut remaining: HashSet<String> = tables.keys().cloned().collect();
    doc.for_each_element_mut(TAG_TABLE, &mut |table| {
        let name = match table.get_attribute(ATTR_TABLE_NAME) {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };
        if let Some(grid) = tables.get(&name) {
            fill_table(table, &name, grid)?;
            remaining.remove(&name);
        }
        Ok(())
    })?;

    if let Some(name) = remaining.into_iter().next() {
        return Err(Error::UnmatchedBinding {
            kind: BindingKind::Table,
            name,
        });
    }
    Ok(())
}

/// Fill one table structure from a grid.
pub(crate) fn fill_table(table: &mut Element, name: &str, grid: &Grid) -> Result<()> {
    grow_rows(table, name, grid.len())?;
    check_row_shapes(table, name, grid)?;

    let mut row_index = 0;
    table.for_each_element_mut(TAG_TABLE_ROW, &mut |row| {
        if row_index < grid.len() {
            write_row(row, &grid[row_index])?;
        }
        row_index += 1;
        Ok(())
    })
}

/// Append clones of the last existing row until the table holds at least
/// `row_count` rows. Rows are never removed.
fn grow_rows(table: &mut Element, name: &str, row_count: usize) -> Result<()> {
    let (existing, last_row) = {
        let rows = table.elements_by_tag(TAG_TABLE_ROW);
        (rows.len(), rows.last().map(|row| (*row).clone()))
    };
    if existing >= row_count {
        return Ok(());
    }

    let template_row = last_row.ok_or_else(|| {
        Error::MalformedTemplate(format!("table {name} has no row to grow from"))
    })?;
    for _ in existing..row_count {
        table.add_child(Node::Element(template_row.clone()));
    }
    Ok(())
}

/// Verify that every bound row matches its template row's cell count.
fn check_row_shapes(table: &Element, name: &str, grid: &Grid) -> Result<()> {
    let rows = table.elements_by_tag(TAG_TABLE_ROW);
    for (row, bound) in rows.iter().zip(grid) {
        let cells = row.elements_by_tag(TAG_TABLE_CELL).len();
        if cells != bound.len() {
            return Err(Error::ShapeMismatch {
                table: name.to_string(),
                expected: cells,
                got: bound.len(),
            });
        }
    }
    Ok(())
}

fn write_row(row: &mut Element, values: &[String]) -> Result<()> {
    let mut cell_index = 0;
    row.for_each_element_mut(TAG_TABLE_CELL, &mut |cell| {
        if cell_index < values.len() {
            write_cell(cell, &values[cell_index]);
        }
        cell_index += 1;
        Ok(())
    })
}

fn write_cell(cell: &mut Element, value: &str) {
    let value_type = if is_numeric(value) {
        VALUE_TYPE_FLOAT
    } else {
        VALUE_TYPE_STRING
    };
    cell.set_attribute(ATTR_OFFICE_VALUE, value);
    cell.set_attribute(ATTR_OFFICE_VALUE_TYPE, value_type);
    if let Some(paragraph) = cell.find_first_mut(TAG_PARAGRAPH) {
        paragraph.set_text_content(value);
    }
}

/// Signed, optionally-decimal numeric literal: optional leading minus,
/// digits, optional single decimal point followed by digits.
fn is_numeric(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}
