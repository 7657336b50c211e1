use super::{OutputFormatter, Table};
use crate::dispatcher::Outcome;
use anyhow::Result;
use colored::*;
use harmony_client_core::{Container, Machine};
use serde_json::json;

const CONTAINER_LIST_COLUMNS: [&str; 5] = ["ID", "Name", "Hostname", "Machine ID", "CID"];
const CONTAINER_DETAIL_COLUMNS: [&str; 8] = [
    "ID",
    "Name",
    "Hostname",
    "Machine ID",
    "Image",
    "Entry Point",
    "Enabled",
    "CID",
];
const MACHINE_COLUMNS: [&str; 3] = ["ID", "Name", "Hostname"];
const MACHINE_CONTAINER_COLUMNS: [&str; 1] = ["Containers"];

fn container_list_row(c: &Container) -> Vec<String> {
    vec![
        c.id.clone(),
        c.name.clone(),
        c.hostname.clone(),
        c.machine_id.clone(),
        c.short_cid().to_string(),
    ]
}

fn container_detail_row(c: &Container) -> Vec<String> {
    vec![
        c.id.clone(),
        c.name.clone(),
        c.hostname.clone(),
        c.machine_id.clone(),
        c.image.clone(),
        c.entry_point.clone(),
        c.enabled.to_string(),
        c.short_cid().to_string(),
    ]
}

fn machine_row(m: &Machine) -> Vec<String> {
    vec![m.id.clone(), m.name.clone(), m.hostname.clone()]
}

/// The tables an outcome is shown as; empty for scalar outcomes
pub(crate) fn tables_for(outcome: &Outcome) -> Vec<Table> {
    match outcome {
        Outcome::Created(_) | Outcome::Ok => Vec::new(),
        Outcome::Containers(containers) => {
            let mut table = Table::new(CONTAINER_LIST_COLUMNS);
            for c in containers {
                table.push_row(container_list_row(c));
            }
            vec![table]
        }
        Outcome::Container(container) => {
            let mut table = Table::new(CONTAINER_DETAIL_COLUMNS);
            table.push_row(container_detail_row(container));
            vec![table]
        }
        Outcome::Machines(machines) => {
            let mut table = Table::new(MACHINE_COLUMNS);
            for m in machines {
                table.push_row(machine_row(m));
            }
            vec![table]
        }
        Outcome::Machine(machine) => {
            let mut summary = Table::new(MACHINE_COLUMNS);
            summary.push_row(machine_row(machine));

            let mut hosted = Table::new(MACHINE_CONTAINER_COLUMNS);
            for id in &machine.container_ids {
                hosted.push_row([id.as_str()]);
            }
            vec![summary, hosted]
        }
    }
}

/// Borderless tables for people
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &Outcome) -> Result<String> {
        match outcome {
            Outcome::Created(id) => Ok(format!("{id}\n")),
            Outcome::Ok => {
                if self.use_color {
                    Ok(format!("{}\n", "OK".green()))
                } else {
                    Ok("OK\n".to_string())
                }
            }
            _ => Ok(tables_for(outcome).iter().map(Table::render).collect()),
        }
    }
}

/// JSON for scripts
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &Outcome) -> Result<String> {
        let value = match outcome {
            Outcome::Created(id) => json!({ "id": id }),
            Outcome::Ok => json!({ "status": "OK" }),
            Outcome::Containers(containers) => serde_json::to_value(containers)?,
            Outcome::Container(container) => serde_json::to_value(container)?,
            Outcome::Machines(machines) => serde_json::to_value(machines)?,
            Outcome::Machine(machine) => serde_json::to_value(machine)?,
        };

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

/// CSV with the same columns as the text tables
pub struct CsvFormatter;

impl OutputFormatter for CsvFormatter {
    fn format(&self, outcome: &Outcome) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        match outcome {
            Outcome::Created(id) => {
                wtr.write_record(["id"])?;
                wtr.write_record([id])?;
            }
            Outcome::Ok => {
                wtr.write_record(["status"])?;
                wtr.write_record(["OK"])?;
            }
            Outcome::Machine(machine) => {
                // One row per hosted container so the machine stays a single table
                wtr.write_record(["id", "name", "hostname", "container_id"])?;
                if machine.container_ids.is_empty() {
                    wtr.write_record([
                        machine.id.as_str(),
                        machine.name.as_str(),
                        machine.hostname.as_str(),
                        "",
                    ])?;
                }
                for container_id in &machine.container_ids {
                    wtr.write_record([
                        &machine.id,
                        &machine.name,
                        &machine.hostname,
                        container_id,
                    ])?;
                }
            }
            _ => {
                for table in tables_for(outcome) {
                    wtr.write_record(
                        table
                            .headers()
                            .iter()
                            .map(|h| h.to_lowercase().replace(' ', "_")),
                    )?;
                    for row in table.rows() {
                        wtr.write_record(row)?;
                    }
                }
            }
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
