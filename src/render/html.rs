use crate::record::row::COLUMNS;
use crate::validation::ValidationReport;

/// Render a self-contained HTML report (data embedded as JSON).
///
/// The template is filled with `replace` rather than `format!()` since the
/// script body is full of `{}` and `${x}`.
pub fn render_html_report(report: &ValidationReport) -> anyhow::Result<String> {
    // `<` escaped so record text can never close the script tag.
    let json = serde_json::to_string(report)?.replace('<', "\\u003c");
    let columns = serde_json::to_string(&COLUMNS)?;

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Hierarchy validation</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { padding: 12px 16px; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .pill.bad { border-color: #f1b5b5; background: #fff3f3; }
  ul.dataset { color: #a00; }
  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; }
  td.error { color: #a00; }
  .muted { color: #777; font-size: 12px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>
<main>
  <ul class="dataset" id="dataset"></ul>
  <h3>Invalid records</h3>
  <table id="invalid"></table>
  <h3>Valid records</h3>
  <table id="valid"></table>
  <h3>Root</h3>
  <table id="roots"></table>
</main>

<script>
const DATA = __DATA__;
const COLUMNS = __COLUMNS__;

function esc(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const pills = [
    ["valid", DATA.validRecords.length, false],
    ["invalid", DATA.invalidRecords.length, DATA.invalidRecords.length > 0],
    ["root", DATA.rootRecords.length, false],
    ["dataset errors", DATA.datasetErrors.length, DATA.datasetErrors.length > 0],
  ];
  document.getElementById("summary").innerHTML = pills
    .map(([k, v, bad]) => `<span class="pill${bad ? " bad" : ""}">${esc(k)}: <b>${v}</b></span>`)
    .join("");
  document.getElementById("dataset").innerHTML = DATA.datasetErrors
    .map(e => `<li>${esc(e)}</li>`)
    .join("");
}

function renderTable(id, rows, withError) {
  const el = document.getElementById(id);
  if (!rows.length) {
    el.outerHTML = `<div class="muted">none</div>`;
    return;
  }
  const cols = withError ? [...COLUMNS, "error"] : COLUMNS;
  const head = `<thead><tr>${cols.map(c => `<th>${esc(c)}</th>`).join("")}</tr></thead>`;
  const body = rows
    .map(r => `<tr>${cols.map(c => `<td class="${c}">${esc(r[c])}</td>`).join("")}</tr>`)
    .join("");
  el.innerHTML = head + `<tbody>${body}</tbody>`;
}

renderSummary();
renderTable("invalid", DATA.invalidRecords, true);
renderTable("valid", DATA.validRecords, false);
renderTable("roots", DATA.rootRecords, false);
</script>
</body>
</html>
"#;

    Ok(TEMPLATE
        .replace("__DATA__", &json)
        .replace("__COLUMNS__", &columns))
}
