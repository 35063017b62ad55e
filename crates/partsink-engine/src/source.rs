//! Local partition inputs.
//!
//! Each input (a file, or `-` for stdin) is one partition. Records are read
//! in file order; blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use partsink_types::{KeyedMessage, PartitionId};

use crate::config::types::InputFormat;
use crate::errors::LoadError;

/// Where a partition's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin; anything else is a file path.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// One partition to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInput {
    pub id: PartitionId,
    pub source: InputSource,
}

/// Number `args` as partitions in the order given.
#[must_use]
pub fn partition_inputs<S: AsRef<str>>(args: &[S]) -> Vec<PartitionInput> {
    (0u32..)
        .zip(args)
        .map(|(i, arg)| PartitionInput {
            id: PartitionId::new(i),
            source: InputSource::parse(arg.as_ref()),
        })
        .collect()
}

/// Read every record of `input`.
///
/// # Errors
///
/// Returns [`LoadError::Read`] on I/O failure and [`LoadError::Decode`] for
/// a malformed keyed message.
pub fn read_records(input: &PartitionInput, format: InputFormat) -> Result<Vec<String>, LoadError> {
    let name = input.source.describe();
    match &input.source {
        InputSource::Stdin => {
            let stdin = std::io::stdin();
            read_from(stdin.lock(), format, input.id, &name)
        }
        InputSource::File(path) => {
            let file = File::open(path).map_err(|source| LoadError::Read {
                partition: input.id,
                input: name.clone(),
                source,
            })?;
            read_from(BufReader::new(file), format, input.id, &name)
        }
    }
}

/// Decode records from any buffered reader.
///
/// # Errors
///
/// See [`read_records`].
pub fn read_from<R: BufRead>(
    reader: R,
    format: InputFormat,
    partition: PartitionId,
    name: &str,
) -> Result<Vec<String>, LoadError> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            partition,
            input: name.to_string(),
            source,
        })?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        let record = match format {
            InputFormat::Lines => line.to_string(),
            InputFormat::Keyed => serde_json::from_str::<KeyedMessage>(line)
                .map_err(|source| LoadError::Decode {
                    partition,
                    input: name.to_string(),
                    line: i + 1,
                    source,
                })?
                .into_value(),
        };
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    #[test]
    fn lines_skip_blanks_and_strip_cr() {
        let data = "one\r\n\n  \ntwo\nthree";
        let records =
            read_from(Cursor::new(data), InputFormat::Lines, PartitionId::new(0), "t").unwrap();
        assert_eq!(records, vec!["one", "two", "three"]);
    }

    #[test]
    fn keyed_lines_project_to_value() {
        let data = "{\"key\":\"k1\",\"value\":\"{\\\"id\\\":1}\"}\n{\"value\":\"plain\"}\n";
        let records =
            read_from(Cursor::new(data), InputFormat::Keyed, PartitionId::new(0), "t").unwrap();
        assert_eq!(records, vec!["{\"id\":1}", "plain"]);
    }

    #[test]
    fn keyed_decode_error_reports_line() {
        let data = "{\"value\":\"ok\"}\nnot json\n";
        let err = read_from(Cursor::new(data), InputFormat::Keyed, PartitionId::new(2), "in.jsonl")
            .unwrap_err();
        match err {
            LoadError::Decode { partition, line, .. } => {
                assert_eq!(partition, PartitionId::new(2));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inputs_are_numbered_in_order() {
        let inputs = partition_inputs(&["a.txt", "-", "b.txt"]);
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[1].id, PartitionId::new(1));
        assert_eq!(inputs[1].source, InputSource::Stdin);
        assert_eq!(inputs[2].source, InputSource::File(PathBuf::from("b.txt")));
    }

    #[test]
    fn reads_file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"id\":\"a\"}}").unwrap();
        writeln!(file, "{{\"id\":\"b\"}}").unwrap();
        let input = PartitionInput {
            id: PartitionId::new(0),
            source: InputSource::File(file.path().to_path_buf()),
        };
        let records = read_records(&input, InputFormat::Lines).unwrap();
        assert_eq!(records, vec!["{\"id\":\"a\"}", "{\"id\":\"b\"}"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let input = PartitionInput {
            id: PartitionId::new(5),
            source: InputSource::File(PathBuf::from("/nonexistent/partition.txt")),
        };
        let err = read_records(&input, InputFormat::Lines).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.partition(), PartitionId::new(5));
    }
}
