use html_escape::encode_text;

use crate::csv::{cell_text, money};
use crate::table::{Cell, ReportTable};

const HEAD: &str = r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:x="urn:schemas-microsoft-com:office:excel">
<head>
<meta charset="UTF-8">
<style>
table { border-collapse: collapse; }
th { background-color: #4F46E5; color: white; font-weight: bold; padding: 8px; border: 1px solid #ddd; }
td { padding: 6px; border: 1px solid #ddd; }
tr:nth-child(even) { background-color: #f9f9f9; }
.number { text-align: right; }
.currency { text-align: right; color: #059669; }
</style>
</head>
<body>
<table>
"#;

/// Render as an HTML table that spreadsheet applications open as `.xls`.
pub(crate) fn render(table: &ReportTable) -> String {
    let mut html = String::from(HEAD);

    html.push_str("<thead><tr>");
    for column in &table.columns {
        html.push_str("<th>");
        html.push_str(&encode_text(column.header));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in &row.cells {
            let (class, text) = match cell {
                Cell::Currency(d) => ("currency", format!("${}", money(*d))),
                Cell::Integer(_) | Cell::Number(_) => ("number", cell_text(cell)),
                _ => ("", cell_text(cell)),
            };
            html.push_str(&format!(
                "<td class=\"{class}\">{}</td>",
                encode_text(&text)
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody></table></body></html>");
    html
}
