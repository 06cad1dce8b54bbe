use actix_web::{get, post, web, HttpResponse, Responder};

use super::forms::{ContactForm, ContactQuery};
use super::{add_log, error_response, html, see_other, views, HttpState};
use crate::domain::error::AppError;

const CONTACTS_PATH: &str = "/contacts";

#[get("/contacts")]
async fn list_contacts(
    data: web::Data<HttpState>,
    query: web::Query<ContactQuery>,
) -> impl Responder {
    let q = query.into_inner().q.unwrap_or_default();
    match data.contacts.list(Some(&q)).await {
        Ok(contacts) => html(views::contacts_page(&contacts, &q)),
        Err(e) => {
            add_log(&data.logs, "ERROR", "Contacts", &format!("Failed to list contacts: {}", e));
            error_response(&e)
        }
    }
}

#[post("/contacts/add")]
async fn add_contact(data: web::Data<HttpState>, form: web::Form<ContactForm>) -> impl Responder {
    match data.contacts.add(form.into_inner().into()).await {
        Ok(contact) => {
            add_log(
                &data.logs,
                "INFO",
                "Contacts",
                &format!("Added contact {} ({})", contact.id, contact.name),
            );
            see_other(CONTACTS_PATH)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/contacts/update/{id}")]
async fn update_contact(
    data: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<ContactForm>,
) -> impl Responder {
    let id = path.into_inner();
    match data.contacts.update(id, form.into_inner().into()).await {
        Ok(_) => see_other(CONTACTS_PATH),
        Err(AppError::NotFound(_)) => {
            tracing::debug!(id, "Update of unknown contact ignored");
            see_other(CONTACTS_PATH)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/contacts/delete/{id}")]
async fn delete_contact(data: web::Data<HttpState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match data.contacts.delete(id).await {
        Ok(()) => {
            add_log(&data.logs, "INFO", "Contacts", &format!("Deleted contact {}", id));
            see_other(CONTACTS_PATH)
        }
        Err(AppError::NotFound(_)) => {
            tracing::debug!(id, "Delete of unknown contact ignored");
            see_other(CONTACTS_PATH)
        }
        Err(e) => error_response(&e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_contacts)
        .service(add_contact)
        .service(update_contact)
        .service(delete_contact);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::test_state;
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_add_redirects_and_lists() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/contacts/add")
            .set_form([("name", "Ada"), ("email", "ada@example.com"), ("phone", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(resp.headers().get("location").unwrap(), "/contacts");

        let contacts = state.contacts.list(None).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone, None);

        let req = test::TestRequest::get().uri("/contacts?q=ada%40").to_request();
        let page = test::call_and_read_body(&app, req).await;
        let page = String::from_utf8(page.to_vec()).unwrap();
        assert!(page.contains(r#"value="Ada""#));
    }

    #[actix_web::test]
    async fn test_delete_unknown_contact_redirects() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/contacts/delete/12345")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(state.contacts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_update_changes_fields() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let created = state
            .contacts
            .add(crate::domain::contact::ContactInput::new(
                "Ada".to_string(),
                None,
                None,
                None,
            ))
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/contacts/update/{}", created.id))
            .set_form([("name", "Ada L."), ("notes", "pioneer")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 303);

        let contacts = state.contacts.list(None).await.unwrap();
        assert_eq!(contacts[0].name, "Ada L.");
        assert_eq!(contacts[0].notes.as_deref(), Some("pioneer"));
    }

    #[actix_web::test]
    async fn test_add_blank_name_is_400() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/contacts/add")
            .set_form([("name", "  ")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
