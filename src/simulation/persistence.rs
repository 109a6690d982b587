// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result files of a run.
//!
//! Every series file starts with a header of quantity labels, each followed by `|`.
//! Records are `NNN:` (time index, three digits) followed by signed three-decimal
//! fields, e.g. `004:+0.123|-0.456|`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::estimators::composite::CompositeVariable;
use crate::network::{LinkQuantity, Network, NodeQuantity};
use crate::simulation::model::Properties;

pub const PROPERTIES_FILE: &str = "simulation_properties.json";

pub fn header_line<S: AsRef<str>>(labels: &[S]) -> String {
    labels.iter().map(|l| format!("{}|", l.as_ref())).collect()
}

/// Format one record with an explicit sign on every field.
pub fn format_record(time: usize, values: &[f64]) -> String {
    let mut line = format!("{time:03}:");
    for &value in values {
        // -0.0 is written as +0.000
        let value = if value == 0.0 { 0.0 } else { value };
        line.push_str(&format!("{value:+.3}|"));
    }
    line
}

/// Writes node, link, E-value and composite series below one directory.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    directory: PathBuf,
}

impl ResultWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn node_file(&self, node: &str) -> PathBuf {
        self.directory.join(format!("Node_{node}.txt"))
    }

    pub fn link_file(&self, first: &str, second: &str) -> PathBuf {
        self.directory.join(format!("Link_{first}_{second}.txt"))
    }

    pub fn e_values_file(&self, node: &str) -> PathBuf {
        self.directory.join(format!("Node_{node}_E_values.txt"))
    }

    pub fn composite_file(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.txt"))
    }

    /// Start every series file with its header, truncating previous runs.
    pub fn create_headers(&self, network: &Network, composites: &[CompositeVariable]) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let node_header = header_line(&NodeQuantity::ALL.map(|q| q.label()));
        for node in network.nodes() {
            write_fresh(&self.node_file(node.name()), &node_header)?;
        }
        let link_labels: Vec<&str> = LinkQuantity::all().iter().map(|q| q.label()).collect();
        let link_header = header_line(&link_labels);
        for link in network.links() {
            write_fresh(&self.link_file(link.first(), link.second()), &link_header)?;
        }
        for composite in composites {
            write_fresh(
                &self.composite_file(composite.name()),
                &header_line(&composite.labels()),
            )?;
        }
        Ok(())
    }

    pub fn append_node_record(&self, node: &str, time: usize, values: &[f64]) -> Result<()> {
        append_line(&self.node_file(node), &format_record(time, values))
    }

    pub fn append_link_record(
        &self,
        first: &str,
        second: &str,
        time: usize,
        values: &[f64],
    ) -> Result<()> {
        append_line(&self.link_file(first, second), &format_record(time, values))
    }

    pub fn append_composite_record(&self, name: &str, time: usize, values: &[f64]) -> Result<()> {
        append_line(&self.composite_file(name), &format_record(time, values))
    }

    /// Write the whole E series of a node; `times` labels each value.
    pub fn write_e_values(&self, node: &str, times: &[usize], values: &[f64]) -> Result<()> {
        let path = self.e_values_file(node);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{}", header_line(&["E"]))?;
        for (&time, &value) in times.iter().zip(values) {
            writeln!(writer, "{}", format_record(time, &[value]))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save_properties(&self, properties: &Properties) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let writer = BufWriter::new(File::create(self.directory.join(PROPERTIES_FILE))?);
        serde_json::to_writer_pretty(writer, properties)?;
        Ok(())
    }
}

fn write_fresh(path: &Path, line: &str) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}
