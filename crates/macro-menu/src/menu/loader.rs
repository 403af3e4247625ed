use super::domain::MenuColumn;
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Workbook(calamine::Error),
    NoWorksheet,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read menu export: {}", err),
            LoadError::Csv(err) => write!(f, "invalid menu CSV data: {}", err),
            LoadError::Workbook(err) => write!(f, "invalid menu workbook: {}", err),
            LoadError::NoWorksheet => write!(f, "menu workbook has no worksheet"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::Workbook(err) => Some(err),
            LoadError::NoWorksheet => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err)
    }
}

/// Export formats the loader reads, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ => Self::Csv,
        }
    }
}

/// One source row restricted to the recognized columns, cells still untyped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: [Option<String>; MenuColumn::COUNT],
}

impl RawRow {
    pub fn get(&self, column: MenuColumn) -> Option<&str> {
        self.cells[column.index()].as_deref()
    }

    pub fn set(&mut self, column: MenuColumn, value: impl Into<String>) {
        self.cells[column.index()] = Some(value.into());
    }

    pub fn with(mut self, column: MenuColumn, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }
}

/// In-memory copy of a menu export.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub columns: Vec<MenuColumn>,
    pub rows: Vec<RawRow>,
}

impl LoadedTable {
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let columns = MenuColumn::ordered()
            .into_iter()
            .filter(|column| rows.iter().any(|row| row.get(*column).is_some()))
            .collect();
        Self { columns, rows }
    }

    pub fn has_column(&self, column: MenuColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn missing_columns(&self) -> Vec<MenuColumn> {
        MenuColumn::ordered()
            .into_iter()
            .filter(|column| !self.has_column(*column))
            .collect()
    }
}

pub struct MenuLoader;

impl MenuLoader {
    /// Reads a spreadsheet workbook or a CSV export, depending on the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LoadedTable, LoadError> {
        let path = path.as_ref();
        match SourceFormat::from_path(path) {
            SourceFormat::Workbook => Self::from_workbook(path),
            SourceFormat::Csv => Self::from_reader(std::fs::File::open(path)?),
        }
    }

    /// First worksheet of the workbook; its first row holds the headers.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<LoadedTable, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::NoWorksheet)??;

        let mut sheet_rows = range.rows();
        let Some(header) = sheet_rows.next() else {
            return Ok(LoadedTable::default());
        };
        let positions =
            header_positions(header.iter().map(|cell| cell_text(cell).unwrap_or_default()));

        let rows = sheet_rows
            .map(|cells| {
                let mut row = RawRow::default();
                for (column, position) in &positions {
                    if let Some(text) = cells.get(*position).and_then(cell_text) {
                        row.set(*column, text);
                    }
                }
                row
            })
            .collect();

        Ok(table_from(positions, rows))
    }

    /// CSV export. Cells that are not valid UTF-8 are decoded lossily instead of
    /// failing the whole file.
    pub fn from_reader<R: Read>(reader: R) -> Result<LoadedTable, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.byte_headers()?.clone();
        let positions = header_positions(headers.iter().map(String::from_utf8_lossy));

        let mut rows = Vec::new();
        for record in csv_reader.byte_records() {
            let record = record?;
            let mut row = RawRow::default();
            for (column, position) in &positions {
                if let Some(cell) = record.get(*position).filter(|cell| !cell.is_empty()) {
                    row.set(*column, String::from_utf8_lossy(cell));
                }
            }
            rows.push(row);
        }

        Ok(table_from(positions, rows))
    }
}

// First header occurrence wins when a column is repeated.
fn header_positions<I, S>(headers: I) -> Vec<(MenuColumn, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: Vec<(MenuColumn, usize)> = Vec::new();
    for (position, header) in headers.into_iter().enumerate() {
        if let Some(column) = MenuColumn::from_header(header.as_ref()) {
            if positions.iter().all(|(known, _)| *known != column) {
                positions.push((column, position));
            }
        }
    }
    positions
}

fn table_from(positions: Vec<(MenuColumn, usize)>, rows: Vec<RawRow>) -> LoadedTable {
    let mut columns: Vec<MenuColumn> = positions.into_iter().map(|(column, _)| column).collect();
    columns.sort_by_key(|column| column.index());
    LoadedTable { columns, rows }
}

/// Spreadsheet cell as text; blanks and error cells (`#N/A`, `#DIV/0!`) are missing.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(value) => value.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn keeps_known_columns_and_drops_the_rest() {
        let csv = "\u{feff}restaurant,item_name,potassium,calories\nX,A,300,500\n";
        let table = MenuLoader::from_reader(Cursor::new(csv)).expect("loads");

        assert_eq!(
            table.columns,
            vec![
                MenuColumn::Restaurant,
                MenuColumn::ItemName,
                MenuColumn::Calories
            ]
        );
        let row = &table.rows[0];
        assert_eq!(row.get(MenuColumn::Restaurant), Some("X"));
        assert_eq!(row.get(MenuColumn::Calories), Some("500"));
        assert!(table.missing_columns().contains(&MenuColumn::Sugar));
    }

    #[test]
    fn empty_cells_load_as_missing() {
        let csv = "restaurant,item_name,calories,sugar\nX,A,500,\n";
        let table = MenuLoader::from_reader(Cursor::new(csv)).expect("loads");
        assert_eq!(table.rows[0].get(MenuColumn::Sugar), None);
    }

    #[test]
    fn ragged_rows_are_a_structural_error() {
        let csv = "restaurant,item_name,calories\nX,A,500,12,extra\n";
        let error = MenuLoader::from_reader(Cursor::new(csv)).expect_err("ragged row rejected");
        assert!(matches!(error, LoadError::Csv(_)));
    }

    #[test]
    fn invalid_utf8_cells_are_decoded_lossily() {
        let csv = b"restaurant,item_name,item_description,calories,protein\n\
X,A,Caf\xE9 wrap,500,30\n\
X,B,plain,400,20\n";
        let table = MenuLoader::from_reader(Cursor::new(csv.to_vec())).expect("loads");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0].get(MenuColumn::ItemDescription),
            Some("Caf\u{fffd} wrap")
        );
        assert_eq!(table.rows[0].get(MenuColumn::Calories), Some("500"));
        assert_eq!(table.rows[1].get(MenuColumn::ItemName), Some("B"));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/ms_annual_data_2022.xlsx")),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("legacy/MENU.XLS")),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("data/menu_items.csv")),
            SourceFormat::Csv
        );
        assert_eq!(SourceFormat::from_path(Path::new("menu")), SourceFormat::Csv);
    }

    #[test]
    fn reads_first_worksheet_of_workbook() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/menu_sample.xlsx");

        let table = MenuLoader::from_path(&path).expect("workbook loads");

        assert!(table.has_column(MenuColumn::MenuItemId));
        assert!(table.has_column(MenuColumn::Sodium));
        assert!(!table.has_column(MenuColumn::Sugar));
        assert_eq!(table.rows.len(), 3);

        let first = &table.rows[0];
        assert_eq!(first.get(MenuColumn::MenuItemId), Some("1"));
        assert_eq!(first.get(MenuColumn::Restaurant), Some("X"));
        assert_eq!(first.get(MenuColumn::ItemName), Some("A"));
        assert_eq!(first.get(MenuColumn::Calories), Some("500"));
        assert_eq!(first.get(MenuColumn::Sodium), Some("1.2"));
        assert_eq!(table.rows[1].get(MenuColumn::Sodium), None);
    }

    #[test]
    fn missing_workbook_is_a_workbook_error() {
        let error = MenuLoader::from_path("./does-not-exist.xlsx").expect_err("missing workbook");
        assert!(matches!(error, LoadError::Workbook(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            MenuLoader::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            LoadError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn from_rows_reports_populated_columns() {
        let table = LoadedTable::from_rows(vec![RawRow::default()
            .with(MenuColumn::Restaurant, "X")
            .with(MenuColumn::Protein, "12")]);
        assert!(table.has_column(MenuColumn::Protein));
        assert!(!table.has_column(MenuColumn::Calories));
    }
}
