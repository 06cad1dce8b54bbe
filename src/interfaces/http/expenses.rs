use actix_multipart::Multipart;
use actix_web::{get, post, web, Responder};

use super::forms::{ExpenseForm, ExpenseQuery};
use super::upload::read_text_field;
use super::{add_log, error_response, html, see_other, views, HttpState};
use crate::domain::expense::ImportReport;

#[get("/expenses")]
async fn list_expenses(
    data: web::Data<HttpState>,
    query: web::Query<ExpenseQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let import = match (query.imported, query.skipped) {
        (None, None) => None,
        (inserted, skipped) => Some(ImportReport {
            inserted: inserted.unwrap_or(0),
            skipped: skipped.unwrap_or(0),
        }),
    };

    let expenses = match data.expenses.list().await {
        Ok(expenses) => expenses,
        Err(e) => return error_response(&e),
    };
    let summary = match data.expenses.summary().await {
        Ok(summary) => summary,
        Err(e) => return error_response(&e),
    };

    html(views::expenses_page(&expenses, &summary, import))
}

#[post("/expenses/add")]
async fn add_expense(data: web::Data<HttpState>, form: web::Form<ExpenseForm>) -> impl Responder {
    let form = form.into_inner();
    match data
        .expenses
        .add(&form.date, form.category, form.amount, form.description)
        .await
    {
        Ok(expense) => {
            add_log(
                &data.logs,
                "INFO",
                "Expenses",
                &format!(
                    "Added expense {} ({} {:.2})",
                    expense.id, expense.category, expense.amount
                ),
            );
            see_other("/expenses")
        }
        Err(e) => {
            add_log(&data.logs, "WARN", "Expenses", &format!("Rejected expense: {}", e));
            error_response(&e)
        }
    }
}

#[post("/expenses/upload")]
async fn upload_expenses(data: web::Data<HttpState>, payload: Multipart) -> impl Responder {
    let content = match read_text_field(payload, "file", data.max_upload_bytes).await {
        Ok(content) => content,
        Err(e) => return error_response(&e),
    };

    match data.expenses.import_csv(&content).await {
        Ok(report) => {
            add_log(
                &data.logs,
                "INFO",
                "Expenses",
                &format!(
                    "Imported {} expenses, skipped {}",
                    report.inserted, report.skipped
                ),
            );
            see_other(&format!(
                "/expenses?imported={}&skipped={}",
                report.inserted, report.skipped
            ))
        }
        Err(e) => {
            add_log(&data.logs, "WARN", "Expenses", &format!("Import failed: {}", e));
            error_response(&e)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_expenses)
        .service(add_expense)
        .service(upload_expenses);
}
