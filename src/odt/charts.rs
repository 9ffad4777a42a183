//! Chart binding.
//!
//! A chart binding addresses a `draw:frame` holding an embedded object.
//! The frame's `xlink:href` names the object's directory inside the
//! package; the chart's own content document lives underneath it and
//! carries the chart data in a table named `local-table`. Filling that
//! table reuses the table binder against the sub-document, resolved by
//! path through the archive rather than by holding a cross-document
//! reference.

use crate::common::{BindingKind, Error, Result};
use crate::odt::archive::Archive;
use crate::odt::bindings::Grid;
use crate::odt::constants::{
    ATTR_DRAW_NAME, ATTR_TABLE_NAME, ATTR_XLINK_HREF, CHART_LOCAL_TABLE, CONTENT_XML,
    RELATIVE_PREFIX, TAG_FRAME, TAG_TABLE,
};
use crate::odt::element::Element;
use crate::odt::tables;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Fill the local table of every bound chart's sub-document.
pub(crate) fn bind_charts(
    archive: &mut Archive,
    charts: &HashMap<String, Grid>,
) -> Result<()> {
    if charts.is_empty() {
        return Ok(());
    }

    // Resolve frame references first; the sub-documents are then mutated
    // through path lookups against the archive.
    let mut targets: Vec<(String, String)> = Vec::new();
    {
        let content = archive.document(CONTENT_XML).ok_or_else(|| {
            Error::MalformedTemplate(format!("{CONTENT_XML} is missing"))
        })?;
        for frame in content.elements_by_tag(TAG_FRAME) {
            let name = match frame.get_attribute(ATTR_DRAW_NAME) {
                Some(name) => name,
                None => continue,
            };
            if !charts.contains_key(name) {
                continue;
            }

            let object = frame.first_child_element().ok_or_else(|| {
                Error::MalformedTemplate(format!(
                    "chart frame {name} has no embedded object"
                ))
            })?;
            let href = object.get_attribute(ATTR_XLINK_HREF).ok_or_else(|| {
                Error::MalformedTemplate(format!(
                    "chart frame {name} has no {ATTR_XLINK_HREF} reference"
                ))
            })?;
            let stripped = href.strip_prefix(RELATIVE_PREFIX).unwrap_or(href);
            targets.push((name.to_string(), format!("{stripped}/{CONTENT_XML}")));
        }
    }

    let mut remaining: HashSet<String> = charts.keys().cloned().collect();
    for (name, path) in &targets {
        let chart_doc = archive.document_mut(path).ok_or_else(|| {
            Error::MalformedTemplate(format!(
                "chart sub-document {path} is missing from the package"
            ))
        })?;
        debug!("filling chart {name} via {path}");
        fill_local_table(chart_doc, &charts[name])?;
        remaining.remove(name);
    }

    if let Some(name) = remaining.into_iter().next() {
        return Err(Error::UnmatchedBinding {
            kind: BindingKind::Chart,
            name,
        });
    }
    Ok(())
}

/// Fill the chart's always-present `local-table` structure.
fn fill_local_table(chart_doc: &mut Element, grid: &Grid) -> Result<()> {
    let mut found = false;
    chart_doc.for_each_element_mut(TAG_TABLE, &mut |table| {
        if table.get_attribute(ATTR_TABLE_NAME) == Some(CHART_LOCAL_TABLE) {
            tables::fill_table(table, CHART_LOCAL_TABLE, grid)?;
            found = true;
        }
        Ok(())
    })?;

    if !found {
        return Err(Error::UnmatchedBinding {
            kind: BindingKind::Table,
            name: CHART_LOCAL_TABLE.to_string(),
        });
    }
    Ok(())
}
