// ── Tabular export ──
//
// Flattens a vessel view into one display-formatted row per vessel. The
// module only produces text; choosing where it goes (file, download,
// clipboard) belongs to the caller's writer.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::Vessel;

/// Column headers, in output order.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Name",
    "Client",
    "Fleet",
    "Type",
    "Location",
    "Status",
    "Signal Strength",
    "Data Usage",
    "Download",
    "Upload",
    "Last Contact",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// One exported vessel, every field already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Fleet")]
    pub fleet: String,
    #[serde(rename = "Type")]
    pub vessel_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Signal Strength")]
    pub signal_strength: String,
    #[serde(rename = "Data Usage")]
    pub data_usage: String,
    #[serde(rename = "Download")]
    pub download: String,
    #[serde(rename = "Upload")]
    pub upload: String,
    #[serde(rename = "Last Contact")]
    pub last_contact: String,
}

impl ExportRow {
    pub fn from_vessel(vessel: &Vessel) -> Self {
        Self {
            name: vessel.name.clone(),
            client: vessel.client_name.clone(),
            fleet: vessel.fleet_name.clone(),
            vessel_type: vessel.vessel_type.to_string(),
            location: vessel.location.clone(),
            status: vessel.status.to_string(),
            signal_strength: format!("{}%", vessel.signal_strength),
            data_usage: format!("{} MB", vessel.data_usage_mb),
            download: format!("{:.1} Mbps", vessel.download_mbps),
            upload: format!("{:.1} Mbps", vessel.upload_mbps),
            last_contact: vessel.last_contact.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

pub fn export_rows(vessels: &[Arc<Vessel>]) -> Vec<ExportRow> {
    vessels.iter().map(|v| ExportRow::from_vessel(v)).collect()
}

/// Stream rows as CSV into `writer`: a header record, then one record per
/// row, each `\n` terminated. An empty view still produces the header.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), CoreError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    out.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_csv(rows: &[ExportRow]) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CoreError::Internal(e.to_string()))
}

/// Render rows as a pretty JSON array of objects keyed by column header.
pub fn to_json(rows: &[ExportRow]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn render(vessels: &[Arc<Vessel>], format: ExportFormat) -> Result<String, CoreError> {
    let rows = export_rows(vessels);
    match format {
        ExportFormat::Csv => to_csv(&rows),
        ExportFormat::Json => to_json(&rows),
    }
}

/// Write the export straight to `writer`. Output always ends in `\n`.
pub fn write_export<W: Write>(
    vessels: &[Arc<Vessel>],
    format: ExportFormat,
    mut writer: W,
) -> Result<(), CoreError> {
    let rows = export_rows(vessels);
    match format {
        ExportFormat::Csv => write_csv(&rows, writer),
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        }
    }
}
