use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns every input file must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY];

/// One source row before validation. Every field is optional so a null or
/// empty cell is reported with its row and column rather than as a serde error.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: Option<f64>,
    #[serde(rename = "class")]
    class: Option<f64>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: Option<String>,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let site = self
            .site
            .with_context(|| format!("Row {row}: missing '{COL_SITE}'"))?;
        let payload_mass_kg = self
            .payload_mass_kg
            .with_context(|| format!("Row {row}: missing '{COL_PAYLOAD}'"))?;
        let class = self
            .class
            .with_context(|| format!("Row {row}: missing '{COL_CLASS}'"))?;
        let outcome = Outcome::from_class(class)
            .with_context(|| format!("Row {row}: '{COL_CLASS}' must be 0 or 1, got {class}"))?;
        let booster_version_category = self
            .booster_version_category
            .with_context(|| format!("Row {row}: missing '{COL_BOOSTER_CATEGORY}'"))?;

        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            outcome,
            booster_version_category,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – the same columns as typed Arrow columns
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "Parsed {} records from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<LaunchDataset> {
    let headers = reader.headers().context("reading CSV headers")?;
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<RawLaunchRow> =
        serde_json::from_str(text).context("Expected a JSON array of launch records")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect::<Result<Vec<_>>>()?;

    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the launch columns.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns may be any of
/// Int32/Int64/Float32/Float64, which covers files written by both Pandas and
/// Polars.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, COL_SITE)?;
        let payload_col = column(&batch, COL_PAYLOAD)?;
        let class_col = column(&batch, COL_CLASS)?;
        let booster_col = column(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let raw = RawLaunchRow {
                site: extract_string(site_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_SITE}'"))?,
                payload_mass_kg: extract_f64(payload_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_PAYLOAD}'"))?,
                class: extract_f64(class_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_CLASS}'"))?,
                booster_version_category: extract_string(booster_col, row).with_context(|| {
                    format!("Row {row_no}: failed to read '{COL_BOOSTER_CATEGORY}'")
                })?,
            };
            records.push(raw.into_record(row_no)?);
        }
    }

    LaunchDataset::from_records(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Read a string cell; `None` for null.
fn extract_string(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .context("expected LargeStringArray")?
            .value(row),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    };
    Ok(Some(value.to_string()))
}

/// Read a numeric cell as `f64`; `None` for null.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
3,VAFB SLC-4E,1,9600.0,F9 FT  B1029.1,FT
4,KSC LC-39A,1,2490.0,F9 FT  B1031.1,FT
";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_temp(".csv", CSV.as_bytes());
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds().min, 0.0);
        assert_eq!(ds.payload_bounds().max, 9600.0);

        let rec = &ds.records()[2];
        assert_eq!(rec.outcome, Outcome::Success);
        assert_eq!(rec.booster_version_category, "FT");
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let data = "Launch Site,class,Booster Version Category\nA,1,FT\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_bad_class_names_row() {
        let data = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1\nA,20,2,FT\n";
        // Row 0 is short a field; the csv reader rejects it outright.
        assert!(read_csv(csv::Reader::from_reader(data.as_bytes())).is_err());

        let data = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1,FT\nA,20,2,FT\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "{msg}");
        assert!(msg.contains("'class'"), "{msg}");
    }

    #[test]
    fn csv_empty_cell_is_reported() {
        let data = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,,1,FT\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'Payload Mass (kg)'"));
    }

    #[test]
    fn csv_header_only_is_fatal() {
        let data = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        assert!(read_csv(csv::Reader::from_reader(data.as_bytes())).is_err());
    }

    #[test]
    fn parses_records_oriented_json() {
        let ds = parse_json(
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 500, "class": 1, "Booster Version Category": "v1.0"},
                {"Launch Site": "B", "Payload Mass (kg)": 550.5, "class": 0.0, "Booster Version Category": "FT"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.records()[1].payload_mass_kg, 550.5);
    }

    #[test]
    fn json_null_cell_is_reported() {
        let err = parse_json(
            r#"[{"Launch Site": null, "Payload Mass (kg)": 1, "class": 1, "Booster Version Category": "FT"}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Row 0: missing 'Launch Site'"));
    }

    #[test]
    fn loads_parquet_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![500.0, 3000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["FT", "B4"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].booster_version_category, "B4");
        assert_eq!(ds.payload_bounds().max, 3000.0);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
