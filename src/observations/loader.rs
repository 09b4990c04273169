use crate::observations::error::ObservationError;
use crate::types::columns::ObservationColumn;
use log::{debug, info, warn};
use polars::prelude::*;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

/// Reads daily observation files into a string-typed `DataFrame` with canonical headers.
///
/// Type coercion is left to [`crate::observations::cleaning`]; every column comes
/// back as `String` so that sentinel values such as `Calm` survive until then.
pub struct ObservationLoader;

impl ObservationLoader {
    pub fn read_path(path: &Path) -> Result<DataFrame, ObservationError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ObservationError::FileRead(path.to_path_buf(), e))?;
        info!("Read {} bytes from {}", bytes.len(), path.display());
        Self::read_bytes(&bytes, &path.display().to_string())
    }

    /// Parses raw file bytes. `source_name` is only used in errors and log messages.
    pub fn read_bytes(bytes: &[u8], source_name: &str) -> Result<DataFrame, ObservationError> {
        let text = decode_text(bytes);
        let body = strip_preamble(&text).ok_or_else(|| ObservationError::HeaderNotFound {
            source_name: source_name.to_string(),
        })?;

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            // A zero-length inference window reads every column as String.
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(body.as_bytes().to_vec()))
            .finish()
            .map_err(|e| ObservationError::CsvRead {
                source_name: source_name.to_string(),
                source: e,
            })?;

        let unnamed: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|column| is_unnamed(column.name()) && is_blank(column))
            .map(|column| column.name().to_string())
            .collect();
        for name in unnamed {
            debug!("Dropping unnamed empty column '{}'", name);
            df = df.drop(&name)?;
        }

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| canonical_header(name.as_str()))
            .collect();
        df.set_column_names(names)
            .map_err(|e| ObservationError::CsvRead {
                source_name: source_name.to_string(),
                source: e,
            })?;

        debug!(
            "Loaded {} rows with columns {:?} from {}",
            df.height(),
            df.get_column_names(),
            source_name
        );
        Ok(df)
    }
}

/// Decodes UTF-8 when valid, otherwise treats the bytes as ISO-8859-1.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            warn!("Input is not valid UTF-8, decoding as ISO-8859-1");
            // Every ISO-8859-1 byte maps to the Unicode scalar with the same value.
            Cow::Owned(bytes.iter().map(|&b| b as char).collect::<String>())
        }
    };
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim_start_matches('\u{feff}')),
        Cow::Owned(s) => Cow::Owned(s.trim_start_matches('\u{feff}').to_string()),
    }
}

/// Returns the text starting at the header row, skipping any preamble lines.
fn strip_preamble(text: &str) -> Option<&str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_header_line(line) {
            if offset > 0 {
                debug!("Skipping {} bytes of preamble before header", offset);
            }
            return Some(&text[offset..]);
        }
        offset += line.len();
    }
    None
}

fn is_header_line(line: &str) -> bool {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim())
        .any(|field| field.eq_ignore_ascii_case(ObservationColumn::Date.header()))
}

/// Bureau downloads start every line with an empty field, which the CSV reader
/// names either `""` or `column_N`.
fn is_unnamed(name: &str) -> bool {
    let name = name.trim();
    name.is_empty()
        || name
            .strip_prefix("column_")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

fn is_blank(column: &Column) -> bool {
    column
        .str()
        .map(|values| {
            values
                .into_iter()
                .all(|v| v.map_or(true, |s| s.trim().is_empty()))
        })
        .unwrap_or(false)
}

fn canonical_header(raw: &str) -> String {
    match ObservationColumn::from_header(raw) {
        Some(column) => column.header().to_string(),
        None => raw.trim().to_string(),
    }
}
