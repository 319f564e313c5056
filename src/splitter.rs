use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, SplitError};

pub const DEFAULT_INPUT: &str = "export.geojson";
pub const DEFAULT_PREFIX: &str = "export";
const OUTPUT_EXTENSION: &str = "geojson";
const COLLECTION_TYPE: &str = "FeatureCollection";

/// Where to read from and where to write the two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub input: PathBuf,
    /// Defaults to the directory holding `input`.
    pub output_dir: Option<PathBuf>,
    pub prefix: String,
}

impl SplitConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT)
    }
}

/// One half of the input, shaped as a standalone feature collection.
///
/// Serializes as `{"type": "FeatureCollection", "features": [...]}` in that
/// key order. Feature records are carried over untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollectionPart {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Value>,
}

impl FeatureCollectionPart {
    pub fn new(features: Vec<Value>) -> Self {
        Self {
            kind: COLLECTION_TYPE,
            features,
        }
    }

    /// Pretty-print into `writer` with 4-space indentation.
    pub fn write_pretty<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)
    }
}

/// Paths and feature counts of a finished split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub part1: PathBuf,
    pub part2: PathBuf,
    pub part1_count: usize,
    pub part2_count: usize,
}

impl SplitReport {
    pub fn total_features(&self) -> usize {
        self.part1_count + self.part2_count
    }
}

// Load and parse the input document
pub fn load_document(path: &Path) -> Result<Value> {
    info!("Loading file: {}", path.display());
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => SplitError::NotFound(path.to_path_buf()),
        _ => SplitError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            // the error was raised by the reader, not by the JSON grammar
            SplitError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            SplitError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Take the `features` array out of a parsed document.
///
/// All other top-level keys are discarded.
pub fn extract_features(document: Value) -> Result<Vec<Value>> {
    let Value::Object(mut map) = document else {
        return Err(SplitError::MissingFeaturesKey);
    };

    match map.remove("features") {
        None => Err(SplitError::MissingFeaturesKey),
        Some(Value::Array(features)) => Ok(features),
        Some(other) => Err(SplitError::InvalidFeatures(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Split at `len / 2`. The second half takes the extra element for odd lengths.
pub fn split_features(mut features: Vec<Value>) -> (Vec<Value>, Vec<Value>) {
    let mid = features.len() / 2;
    let second = features.split_off(mid);
    (features, second)
}

pub fn output_paths(config: &SplitConfig) -> (PathBuf, PathBuf) {
    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => config
            .input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    let name = |part: usize| format!("{}_part{}.{}", config.prefix, part, OUTPUT_EXTENSION);
    (dir.join(name(1)), dir.join(name(2)))
}

/// Create or overwrite `path` with the serialized part.
pub fn write_part(path: &Path, part: &FeatureCollectionPart) -> Result<()> {
    let write_err = |source: io::Error| SplitError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    part.write_pretty(&mut writer).map_err(|e| {
        if e.is_io() {
            write_err(e.into())
        } else {
            SplitError::Serialize(e)
        }
    })?;
    writer.flush().map_err(write_err)?;
    debug!(
        "Written {} with {} features",
        path.display(),
        part.features.len()
    );
    Ok(())
}

/// Read `config.input`, halve its features and write both halves.
///
/// Nothing is written when the document has no `features` key.
pub fn split(config: &SplitConfig) -> Result<SplitReport> {
    let document = load_document(&config.input)?;

    let features = match extract_features(document) {
        Ok(features) => features,
        Err(e) => {
            if e.is_recoverable() {
                debug!("{}: {}", config.input.display(), e);
            }
            return Err(e);
        }
    };

    let total = features.len();
    let (first, second) = split_features(features);
    info!(
        "Splitting {} features into {} + {}",
        total,
        first.len(),
        second.len()
    );

    let (part1, part2) = output_paths(config);
    let first = FeatureCollectionPart::new(first);
    let second = FeatureCollectionPart::new(second);
    write_part(&part1, &first)?;
    write_part(&part2, &second)?;

    Ok(SplitReport {
        part1,
        part2,
        part1_count: first.features.len(),
        part2_count: second.features.len(),
    })
}
