use olympic_stats::table::{render_section, render_table};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn render_table_right_aligns_numeric_columns() {
    let headers = strings(&["NOC", "Medals"]);
    let rows = vec![strings(&["USA", "1049"]), strings(&["GBR", "7"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec!["NOC  Medals", "---  ------", "USA    1049", "GBR       7"]
    );
}

#[test]
fn render_table_keeps_text_columns_left_aligned() {
    let headers = strings(&["id", "name"]);
    let rows = vec![strings(&["10", "Alice"]), strings(&["x", "Bob"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["id  name", "--  -----", "10  Alice", "x   Bob"]);
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = strings(&["note"]);
    let rows = vec![strings(&["line1\nline2\tvalue"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 value");
}

#[test]
fn render_table_handles_unicode_and_ansi_widths() {
    let headers = strings(&["résumé", "status"]);
    let rows = vec![strings(&["café", "\u{1b}[31mERR\u{1b}[0m"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "résumé  status");
    assert_eq!(lines[2], "café    \u{1b}[31mERR\u{1b}[0m");
}

#[test]
fn render_section_underlines_the_title() {
    let rendered = render_section("Top sports", &strings(&["Sport"]), &[strings(&["Judo"])]);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Top sports");
    assert_eq!(lines[1], "==========");
    assert_eq!(lines[2], "Sport");
    assert_eq!(lines[4], "Judo");
}
