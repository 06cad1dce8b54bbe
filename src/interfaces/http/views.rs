//! Server-rendered pages.

use crate::domain::contact::Contact;
use crate::domain::csv::CsvPreview;
use crate::domain::expense::{Expense, ExpenseSummary, ImportReport};

const TITLE: &str = "Data Tools Hub";

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape_html).unwrap_or_default()
}

fn layout(content: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<header>
<h1>{title}</h1>
<nav>
<a href="/">Home</a>
<a href="/csv">CSV Cleaner</a>
<a href="/contacts">Contacts</a>
<a href="/expenses">Expenses</a>
<a href="/scraper">Scraper</a>
</nav>
</header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = TITLE,
        content = content
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default()
}

pub fn index_page() -> String {
    layout("<p>Welcome! Choose a tool from the navigation.</p>")
}

pub fn csv_page(preview: Option<&CsvPreview>, error: Option<&str>) -> String {
    let mut content = String::from(
        r#"<h2>CSV Cleaner</h2>
<form action="/csv/preview" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv" required>
<button type="submit">Preview</button>
</form>
"#,
    );
    content.push_str(&error_block(error));

    if let Some(preview) = preview {
        let header_cells: String = preview
            .columns
            .iter()
            .map(|c| format!("<th>{}</th>", escape_html(c)))
            .collect();
        let body_rows: String = preview
            .rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                    .collect();
                format!("<tr>{}</tr>\n", cells)
            })
            .collect();

        content.push_str(&format!(
            r#"<h3>Preview</h3>
<p>Showing {shown} of {total} rows. Columns: {columns}</p>
<table class="table">
<tr>{header_cells}</tr>
{body_rows}</table>
<form action="/csv/clean" method="post">
<input type="hidden" name="token" value="{token}">
<label><input type="checkbox" name="drop_duplicates"> Drop duplicates</label>
<label><input type="checkbox" name="trim_spaces"> Trim spaces</label>
<label>Keep columns (comma-separated): <input name="keep_columns" placeholder="col1, col2"></label>
<button type="submit">Download Cleaned CSV</button>
</form>
"#,
            shown = preview.rows.len(),
            total = preview.total_rows,
            columns = escape_html(&preview.columns.join(", ")),
            header_cells = header_cells,
            body_rows = body_rows,
            token = escape_html(&preview.token),
        ));
    }

    layout(&content)
}

pub fn contacts_page(contacts: &[Contact], q: &str) -> String {
    let rows: String = contacts
        .iter()
        .map(|c| {
            format!(
                r#"<tr>
<td><input form="update-{id}" name="name" value="{name}" required></td>
<td><input form="update-{id}" name="email" value="{email}"></td>
<td><input form="update-{id}" name="phone" value="{phone}"></td>
<td><input form="update-{id}" name="notes" value="{notes}"></td>
<td>
<form id="update-{id}" action="/contacts/update/{id}" method="post" style="display:inline"><button type="submit">Save</button></form>
<form action="/contacts/delete/{id}" method="post" style="display:inline"><button type="submit">Delete</button></form>
</td>
</tr>
"#,
                id = c.id,
                name = escape_html(&c.name),
                email = opt(&c.email),
                phone = opt(&c.phone),
                notes = opt(&c.notes),
            )
        })
        .collect();

    layout(&format!(
        r#"<h2>Contacts</h2>
<form action="/contacts" method="get">
<input name="q" value="{q}" placeholder="Search">
<button type="submit">Search</button>
</form>
<form action="/contacts/add" method="post">
<input name="name" placeholder="Name" required>
<input name="email" placeholder="Email">
<input name="phone" placeholder="Phone">
<input name="notes" placeholder="Notes">
<button type="submit">Add</button>
</form>
<table>
<tr><th>Name</th><th>Email</th><th>Phone</th><th>Notes</th><th>Actions</th></tr>
{rows}</table>
"#,
        q = escape_html(q),
        rows = rows
    ))
}

pub fn expenses_page(
    expenses: &[Expense],
    summary: &ExpenseSummary,
    import: Option<ImportReport>,
) -> String {
    let notice = import
        .map(|r| {
            format!(
                r#"<p class="notice">Imported {} rows ({} skipped).</p>"#,
                r.inserted, r.skipped
            )
        })
        .unwrap_or_default();

    let categories: String = summary
        .by_category
        .iter()
        .map(|(category, amount)| format!("<li>{}: {:.2}</li>\n", escape_html(category), amount))
        .collect();

    let months: String = summary
        .by_month
        .iter()
        .map(|(month, amount)| format!("<li>{}: {:.2}</li>\n", escape_html(month), amount))
        .collect();

    let rows: String = expenses
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>\n",
                e.date.date(),
                escape_html(&e.category),
                opt(&e.description),
                e.amount
            )
        })
        .collect();

    layout(&format!(
        r#"<h2>Expenses</h2>
{notice}<form action="/expenses/add" method="post">
<input type="date" name="date" required>
<input name="category" placeholder="Category" required>
<input type="number" step="0.01" name="amount" placeholder="Amount" required>
<input name="description" placeholder="Description">
<button type="submit">Add</button>
</form>
<form action="/expenses/upload" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv" required>
<button type="submit">Upload CSV</button>
</form>
<p>Total: {total:.2}</p>
<h3>By Category</h3>
<ul>
{categories}</ul>
<h3>By Month</h3>
<ul>
{months}</ul>
<h3>All Expenses</h3>
<table>
<tr><th>Date</th><th>Category</th><th>Description</th><th>Amount</th></tr>
{rows}</table>
"#,
        notice = notice,
        total = summary.total,
        categories = categories,
        months = months,
        rows = rows
    ))
}

pub struct ScrapeView<'a> {
    pub url: &'a str,
    pub selector: &'a str,
    pub results: Option<&'a [String]>,
    pub error: Option<&'a str>,
}

impl Default for ScrapeView<'_> {
    fn default() -> Self {
        Self {
            url: "",
            selector: "p",
            results: None,
            error: None,
        }
    }
}

pub fn scraper_page(view: &ScrapeView<'_>) -> String {
    let mut content = format!(
        r#"<h2>Web Scraper</h2>
<form action="/scraper/run" method="post">
<input name="url" value="{url}" placeholder="https://example.com" required>
<input name="selector" value="{selector}" placeholder="CSS selector (e.g., h2, .class, #id)">
<button type="submit">Scrape</button>
</form>
"#,
        url = escape_html(view.url),
        selector = escape_html(view.selector),
    );
    content.push_str(&error_block(view.error));

    if let Some(results) = view.results {
        let items: String = results
            .iter()
            .map(|r| format!("<li>{}</li>\n", escape_html(r)))
            .collect();
        content.push_str(&format!(
            "<h3>Results for {}</h3>\n<p>{} matches</p>\n<ol>\n{}</ol>\n",
            escape_html(view.url),
            results.len(),
            items
        ));
    }

    layout(&content)
}
