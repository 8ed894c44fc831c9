use anyhow::Context;

use super::model::Table;

/// Suggested file name for the download dialog.
pub const DOWNLOAD_FILE_NAME: &str = "processed_glucose_data.csv";

/// Re-serialize a table as comma-delimited UTF-8 text: header row, then one
/// line per data row, no index column.
pub fn to_csv_bytes(table: &Table) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(table.column_names())
        .context("writing CSV header")?;
    for row in 0..table.n_rows() {
        writer
            .write_record(table.row(row).map(|cell| cell.to_string()))
            .with_context(|| format!("writing CSV row {row}"))?;
    }

    writer.into_inner().context("flushing CSV writer")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::loader::load_bytes;
    use crate::data::model::{CellValue, Column};

    #[test]
    fn reproduces_plain_input() {
        let input = "Time,A,B\n0,100,130\n1,110,140\n";
        let table = load_bytes(input.as_bytes(), b',').unwrap();
        let bytes = to_csv_bytes(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), input);
    }

    #[test]
    fn quotes_names_with_delimiters() {
        let table = load_bytes(b"Time,\"Smith, J\"\n0.5,101.25\n", b',').unwrap();
        let bytes = to_csv_bytes(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Time,\"Smith, J\"\n0.5,101.25\n"
        );
    }

    #[test]
    fn single_column_round_trips() {
        let table = load_bytes(b"Time\n0\n1\n", b',').unwrap();
        let reloaded = load_bytes(&to_csv_bytes(&table).unwrap(), b',').unwrap();
        assert_eq!(reloaded, table);
    }

    fn cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            (-1.0e6f64..1.0e6).prop_map(CellValue::Number),
            "[a-z]{1,8}".prop_map(CellValue::Text),
            Just(CellValue::Empty),
        ]
    }

    proptest! {
        #[test]
        fn export_then_reload_is_identity(
            n_cols in 2usize..5,
            rows in prop::collection::vec(prop::collection::vec(cell(), 5), 0..12),
        ) {
            let columns = (0..n_cols)
                .map(|c| Column::new(format!("col{c}"), rows.iter().map(|r| r[c].clone()).collect()))
                .collect();
            let table = Table::new(columns).unwrap();

            let reloaded = load_bytes(&to_csv_bytes(&table).unwrap(), b',').unwrap();
            prop_assert_eq!(reloaded, table);
        }
    }
}
