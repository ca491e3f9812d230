//! CSV ticket ingestion.
//!
//! Reads a header-first CSV export into categorized [`Ticket`]s. Decoding is
//! lossy (invalid UTF-8 becomes U+FFFD) and missing columns fall back to
//! defaults, so only an unreadable file stops the run.

use crate::analysis::resolve_category;
use crate::models::Ticket;
use csv::{ByteRecord, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Priority used when the priority column is absent.
pub const DEFAULT_PRIORITY: &str = "Low";

/// Errors that abort ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV from {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Positions of the recognized columns in the header row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ColumnMap {
    ticket_id: Option<usize>,
    created_at: Option<usize>,
    subject: Option<usize>,
    description: Option<usize>,
    priority: Option<usize>,
    status: Option<usize>,
    assigned_team: Option<usize>,
    category_hint: Option<usize>,
}

impl ColumnMap {
    /// Locate recognized columns. A repeated name resolves to its last occurrence.
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut columns = Self::default();

        for (index, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            let slot = match name.trim_start_matches('\u{feff}') {
                "ticket_id" => &mut columns.ticket_id,
                "created_at" => &mut columns.created_at,
                "subject" => &mut columns.subject,
                "description" => &mut columns.description,
                "priority" => &mut columns.priority,
                "status" => &mut columns.status,
                "assigned_team" => &mut columns.assigned_team,
                "category_hint" => &mut columns.category_hint,
                _ => continue,
            };
            *slot = Some(index);
        }

        columns
    }
}

/// Decode one field, or `None` if the column is absent or the row is too short.
fn field(record: &ByteRecord, column: Option<usize>) -> Option<Cow<'_, str>> {
    column
        .and_then(|index| record.get(index))
        .map(String::from_utf8_lossy)
}

fn text(record: &ByteRecord, column: Option<usize>) -> String {
    field(record, column).map(Cow::into_owned).unwrap_or_default()
}

/// An empty line. Rows of empty fields (`,,,`) are still tickets.
fn is_empty_line(record: &ByteRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}

/// Build a ticket from one data row, categorizing it unless a hint is present.
fn ticket_from_record(record: &ByteRecord, columns: &ColumnMap) -> (Ticket, bool) {
    let subject = text(record, columns.subject);
    let description = text(record, columns.description);
    let hint = field(record, columns.category_hint);
    let hinted = hint.as_deref().is_some_and(|h| !h.is_empty());
    let category = resolve_category(hint.as_deref(), &subject, &description);

    let ticket = Ticket {
        ticket_id: text(record, columns.ticket_id),
        created_at: text(record, columns.created_at),
        priority: field(record, columns.priority)
            .map_or_else(|| DEFAULT_PRIORITY.to_string(), Cow::into_owned),
        status: text(record, columns.status),
        assigned_team: text(record, columns.assigned_team),
        subject,
        description,
        category,
    };

    (ticket, hinted)
}

/// Read tickets from any CSV source.
pub fn read_tickets_from<R: Read>(source: R) -> Result<Vec<Ticket>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let columns = ColumnMap::from_headers(reader.byte_headers()?);
    debug!("Column layout: {:?}", columns);

    let mut tickets = Vec::new();
    let mut hinted = 0usize;
    let mut record = ByteRecord::new();

    while reader.read_byte_record(&mut record)? {
        if is_empty_line(&record) {
            continue;
        }

        let (ticket, was_hinted) = ticket_from_record(&record, &columns);
        if was_hinted {
            hinted += 1;
        }
        tickets.push(ticket);
    }

    debug!(
        "Read {} tickets ({} hinted, {} auto-categorized)",
        tickets.len(),
        hinted,
        tickets.len() - hinted
    );

    Ok(tickets)
}

/// Read tickets from a CSV file on disk.
pub fn read_tickets(path: &Path) -> Result<Vec<Ticket>, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }

    let tickets = {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        read_tickets_from(file).map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
    };

    info!("Loaded {} tickets from {}", tickets.len(), path.display());
    Ok(tickets)
}
