use crate::utils::error::{ReconError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

pub const STDIN_SOURCE: &str = "-";

/// Lazily yields the lines of a plain file, a gzip file (`.gz`) or stdin (`-`).
pub struct LineSource {
    name: String,
    lines: Lines<Box<dyn BufRead + Send>>,
}

impl LineSource {
    pub fn open(source: &str) -> Result<Self> {
        let reader: Box<dyn BufRead + Send> = if source == STDIN_SOURCE {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let path = Path::new(source);
            let file = File::open(path).map_err(|e| ReconError::SourceUnreadable {
                source_name: source.to_string(),
                message: e.to_string(),
            })?;

            let is_gzip = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

            if is_gzip {
                Box::new(BufReader::new(MultiGzDecoder::new(file)))
            } else {
                Box::new(BufReader::new(file))
            }
        };

        tracing::debug!("Reading domains from {}", source);

        Ok(Self::from_reader(source, reader))
    }

    pub fn from_reader(name: &str, reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            name: name.to_string(),
            lines: reader.lines(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| {
            line.map_err(|e| ReconError::SourceUnreadable {
                source_name: self.name.clone(),
                message: e.to_string(),
            })
        })
    }
}
