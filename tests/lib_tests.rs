use spreadsheet_ods::Value;
use std::path::{Path, PathBuf};
use svxkw::export::{SheetFormat, write_spreadsheet};
use svxkw::report::{LineFormat, Style, parse_location, render_lines, render_summary, render_totals};
use svxkw::{COLUMNS, DEFAULT_KEYWORDS, KeywordSet, Opts, analyze};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn sample_tree(dir: &Path) -> PathBuf {
    write(dir, "B.svx", "*fix B1 0 0 0\n*equate B1 B2\n");
    write(
        dir,
        "A.svx",
        "*begin dow\n*fix A1 0 0 0\n*include B\n*entrance A1\n*end dow\n",
    )
}

// --- KeywordSet ---

#[test]
fn test_keyword_set_normalises_names() {
    let set = KeywordSet::parse_list(" fix, Entrance ,,cs   out");
    assert_eq!(set.joined(), "CS OUT|ENTRANCE|FIX");
    assert!(set.contains("CS OUT"));
    assert!(!set.contains("fix"));
}

#[test]
fn test_keyword_set_structural_always_added() {
    let set = KeywordSet::new(["FIX"]).with_structural();
    assert_eq!(set.joined(), "BEGIN|END|FIX|INCLUDE");
    assert!(KeywordSet::default().with_structural().contains("INCLUDE"));
}

#[test]
fn test_keyword_set_defaults() {
    let set = KeywordSet::defaults();
    assert_eq!(set.len(), DEFAULT_KEYWORDS.len());
    let trimmed = set.difference(&KeywordSet::parse_list("begin,end,include"));
    assert_eq!(trimmed.joined(), "CS|ENTRANCE|EQUATE|FIX");
}

// --- Totals and summary ---

#[test]
fn test_totals_sorted_by_count_then_name() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let table = analyze(&top, &Opts::default()).unwrap();

    assert_eq!(
        table.totals(),
        vec![
            ("FIX".to_string(), 2),
            ("BEGIN".to_string(), 1),
            ("END".to_string(), 1),
            ("ENTRANCE".to_string(), 1),
            ("EQUATE".to_string(), 1),
            ("INCLUDE".to_string(), 1),
        ]
    );
    let lines = render_totals(&table, Style::Plain);
    assert_eq!(lines[0], format!("{}:FIX:2", top.display()));
}

#[test]
fn test_summary_line() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let keywords = KeywordSet::new(["FIX", "EQUATE"]);
    let opts = Opts {
        keywords: keywords.clone(),
        ..Opts::default()
    };
    let table = analyze(&top, &opts).unwrap();

    assert_eq!(
        render_summary(&table, &keywords, Style::Plain, None),
        format!("{}:EQUATE|FIX: 3 records found (2 files)", top.display())
    );
    assert_eq!(
        render_summary(&table, &keywords, Style::Plain, Some(" > out.ods")),
        format!(
            "{}:EQUATE|FIX: 3 records found (2 files) > out.ods",
            top.display()
        )
    );
}

#[test]
fn test_rendered_lines_round_trip_locations() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let table = analyze(&top, &Opts::default()).unwrap();

    let format = LineFormat {
        show_context: true,
        ..LineFormat::default()
    };
    let lines = render_lines(&table, &format);
    assert_eq!(lines.len(), table.len());
    for (line, record) in lines.iter().zip(table.iter()) {
        assert_eq!(
            parse_location(line),
            Some((record.file.clone(), record.line))
        );
    }
    let fix_b1 = lines.iter().find(|l| l.contains("*fix B1")).unwrap();
    assert!(fix_b1.ends_with(":1:dow:*fix B1 0 0 0"));
}

// --- Spreadsheet export ---

#[test]
fn test_export_xlsx_and_ods() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let table = analyze(&top, &Opts::default()).unwrap();
    assert_eq!(COLUMNS.len(), 7);

    for name in ["out.xlsx", "out.ods"] {
        let out = dir.path().join(name);
        write_spreadsheet(&table, &out).unwrap();
        let bytes = std::fs::read(&out).unwrap();
        // Both containers are zip archives.
        assert!(bytes.starts_with(b"PK"), "{} is not a zip container", name);
    }
}

#[test]
fn test_ods_export_layout() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let table = analyze(&top, &Opts::default()).unwrap();
    let out = dir.path().join("out.ods");
    write_spreadsheet(&table, &out).unwrap();

    let workbook = spreadsheet_ods::read_ods(&out).unwrap();
    let sheet = workbook.sheet(0);
    assert_eq!(sheet.name(), "keywords");
    // Header plus one row per record, no index column.
    assert_eq!(
        sheet.used_grid_size(),
        ((table.len() + 1) as u32, COLUMNS.len() as u32)
    );
    for (col, title) in COLUMNS.iter().enumerate() {
        assert_eq!(sheet.value(0, col as u32).as_str_or(""), *title);
    }
    for (i, record) in table.iter().enumerate() {
        let row = (i + 1) as u32;
        assert!(matches!(sheet.value(row, 2), Value::Number(n) if *n == record.line as f64));
        assert_eq!(sheet.value(row, 3).as_str_or(""), record.keyword);
        assert_eq!(sheet.value(row, 5).as_str_or(""), record.path);
    }
}

#[test]
fn test_export_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let top = sample_tree(dir.path());
    let table = analyze(&top, &Opts::default()).unwrap();

    let out = dir.path().join("out.txt");
    assert!(SheetFormat::from_path(&out).is_err());
    assert!(write_spreadsheet(&table, &out).is_err());
    assert!(!out.exists());
}
