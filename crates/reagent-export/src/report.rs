//! Printable HTML report.

use std::fmt::Write as _;

use chrono::NaiveDate;
use reagent_core::chemical::ChemicalRecord;

pub const REPORT_TITLE: &str = "Chemical inventory report";

const CELL: &str = "border: 1px solid #ddd; padding: 8px;";
const HEAD_CELL: &str = "border: 1px solid #ddd; padding: 8px; background-color: #f2f2f2;";

/// Render a standalone page listing name, remaining quantity, expiry date and
/// notification channel for each record. The page opens the print dialog on
/// load.
pub fn to_report(records: &[ChemicalRecord], generated_on: NaiveDate) -> String {
  let mut rows = String::new();
  for r in records {
    let channel = r.notification_channel.as_deref().unwrap_or("N/A");
    // Writing to a String cannot fail.
    let _ = writeln!(
      rows,
      r#"        <tr>
          <td style="{CELL}">{name}</td>
          <td style="{CELL}">{quantity} {unit}</td>
          <td style="{CELL}">{expiry}</td>
          <td style="{CELL} max-width: 150px; overflow-wrap: break-word;">{channel}</td>
        </tr>"#,
      name = escape_html(&r.name),
      quantity = r.current_quantity,
      unit = escape_html(&r.unit),
      expiry = r.expiry_date.format("%Y-%m-%d"),
      channel = escape_html(channel),
    );
  }

  let title = format!("{REPORT_TITLE} - {}", generated_on.format("%Y-%m-%d"));
  format!(
    r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{ font-family: sans-serif; }}
      table {{ width: 100%; border-collapse: collapse; }}
      th, td {{ text-align: left; }}
      @media print {{ body {{ -webkit-print-color-adjust: exact; }} }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
    <table>
      <thead>
        <tr>
          <th style="{HEAD_CELL}">Name</th>
          <th style="{HEAD_CELL}">Remaining</th>
          <th style="{HEAD_CELL}">Expiry date</th>
          <th style="{HEAD_CELL}">Notification channel</th>
        </tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
    <script>window.addEventListener("load", () => window.print());</script>
  </body>
</html>
"#
  )
}

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      other => out.push(other),
    }
  }
  out
}
