//! Workbook reading and spreadsheet file discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

/// Read the first worksheet into a row-major grid of cell strings.
///
/// Rows whose first cell is blank carry no identity and are dropped here,
/// before the reconciler ever sees them.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("Workbook has no sheets: {}", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {sheet_name}"))?;

    let mut grid = Vec::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.first().is_some_and(|c| !c.trim().is_empty()) {
            grid.push(cells);
        }
    }
    Ok(grid)
}

/// Stringify one cell the way a hand-maintained sheet expects: integral
/// numbers without a decimal point, everything else via its display form.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// All importable spreadsheets in a directory: `*.xlsx`, skipping the `~$`
/// lock files Excel leaves while a sheet is open.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".xlsx") && !name.starts_with("~$") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve a user-supplied name against the spreadsheet directory: exact
/// file name first, then the name without its extension, then a substring
/// match.
pub fn find_file(dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    let files = list_files(dir)?;

    for path in &files {
        if path.file_name().and_then(|n| n.to_str()) == Some(name) {
            return Ok(Some(path.clone()));
        }
    }
    let with_ext = format!("{name}.xlsx");
    for path in &files {
        if path.file_name().and_then(|n| n.to_str()) == Some(with_ext.as_str()) {
            return Ok(Some(path.clone()));
        }
    }
    for path in &files {
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(name))
        {
            return Ok(Some(path.clone()));
        }
    }
    Ok(None)
}

/// Game name for an imported file: the file stem ("raid.xlsx" -> "raid").
pub fn game_name_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn lists_xlsx_skipping_lock_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "raid.xlsx");
        touch(dir.path(), "~$raid.xlsx");
        touch(dir.path(), "notes.txt");

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("raid.xlsx"));
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempdir().unwrap();
        let files = list_files(&dir.path().join("missing")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn finds_by_exact_stem_and_substring() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "weekly raid.xlsx");

        let exact = find_file(dir.path(), "weekly raid.xlsx").unwrap();
        assert!(exact.is_some());
        let stem = find_file(dir.path(), "weekly raid").unwrap();
        assert!(stem.is_some());
        let partial = find_file(dir.path(), "raid").unwrap();
        assert!(partial.is_some());
        let missing = find_file(dir.path(), "dungeon").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn game_name_strips_extension() {
        assert_eq!(game_name_for(Path::new("/tmp/raid.xlsx")), "raid");
        assert_eq!(game_name_for(Path::new("raid.xls")), "raid");
    }
}
