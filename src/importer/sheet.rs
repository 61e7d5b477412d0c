// src/importer/sheet.rs

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::ImportError;

/// Valor cru de uma célula, antes de qualquer limpeza.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            // Datas e durações seguem como texto
            other => Cell::Text(other.to_string()),
        }
    }
}

impl Cell {
    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn header_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Número da linha na planilha (1 = primeira linha).
    pub line: usize,
    pub cells: Vec<Cell>,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl SheetRow {
    /// Linhas curtas (colunas finais vazias) devolvem `Cell::Empty`.
    pub fn cell(&self, index: usize) -> &Cell {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Primeira aba (ou o CSV inteiro): cabeçalhos + linhas de dados na ordem do arquivo.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

pub fn read_sheet(filename: &str, bytes: &[u8]) -> Result<Sheet, ImportError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let lines = match extension.as_str() {
        "csv" | "txt" => read_csv(bytes)?,
        _ => read_workbook(bytes)?,
    };

    into_sheet(lines)
}

// A primeira linha não vazia vira o cabeçalho.
fn into_sheet(lines: Vec<SheetRow>) -> Result<Sheet, ImportError> {
    let mut lines = lines.into_iter().skip_while(SheetRow::is_blank);
    let header = lines.next().ok_or(ImportError::MissingHeader)?;

    Ok(Sheet {
        headers: header.cells.iter().map(Cell::header_text).collect(),
        rows: lines.collect(),
    })
}

fn read_workbook(bytes: &[u8]) -> Result<Vec<SheetRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    // O range pode começar depois da linha 1 quando o topo da aba está vazio
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    Ok(range
        .rows()
        .enumerate()
        .map(|(offset, cells)| SheetRow {
            line: first_line + offset,
            cells: cells.iter().map(Cell::from).collect(),
        })
        .collect())
}

fn read_csv(bytes: &[u8]) -> Result<Vec<SheetRow>, ImportError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(bytes))
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ImportError::Unreadable(e.to_string()))?;
        // O leitor pula linhas em branco; a posição guarda a linha real do arquivo
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 1);
        let cells = record
            .iter()
            .map(|value| {
                if value.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(value.to_string())
                }
            })
            .collect();
        rows.push(SheetRow { line, cells });
    }

    Ok(rows)
}

// Excel em locale espanhol exporta CSV com ';'
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();

    if semicolons > commas { b';' } else { b',' }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_keeps_header_and_row_order() {
        let sheet = read_sheet("a.csv", b"RUT,Nombre\n1-9,Ana\n2-7,Luis\n").unwrap();

        assert_eq!(sheet.headers, vec!["RUT", "Nombre"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].line, 2);
        assert_eq!(sheet.rows[1].cell(1), &Cell::Text("Luis".into()));
    }

    #[test]
    fn semicolon_csv_with_bom_is_understood() {
        let sheet = read_sheet("a.CSV", "\u{feff}RUT;Nombre;Cargo\n1-9;Ana;Jefa\n".as_bytes()).unwrap();

        assert_eq!(sheet.headers, vec!["RUT", "Nombre", "Cargo"]);
        assert_eq!(sheet.rows[0].cell(2), &Cell::Text("Jefa".into()));
    }

    #[test]
    fn leading_blank_lines_are_skipped_and_short_rows_pad_with_empty() {
        let sheet = read_sheet("a.csv", b",,\nRUT,Nombre,Cargo\n1-9\n").unwrap();

        assert_eq!(sheet.headers[0], "RUT");
        assert_eq!(sheet.rows[0].cell(2), &Cell::Empty);
        assert_eq!(sheet.rows[0].line, 3);
    }

    #[test]
    fn blank_lines_do_not_shift_row_numbers() {
        let sheet = read_sheet("a.csv", b"RUT,Nombre,Cargo\n1-9,Ana,Jefa\n\n2-7,,Obrero\n").unwrap();

        let lines: Vec<usize> = sheet.rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn empty_file_has_no_header() {
        assert!(matches!(read_sheet("a.csv", b""), Err(ImportError::MissingHeader)));
    }

    #[test]
    fn garbage_workbook_is_unreadable() {
        let err = read_sheet("a.xlsx", b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ImportError::Unreadable(_)));
    }

    #[test]
    fn calamine_values_map_to_cells() {
        assert_eq!(Cell::from(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(Cell::from(&Data::String("x".into())), Cell::Text("x".into()));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }
}
