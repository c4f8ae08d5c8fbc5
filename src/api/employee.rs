use crate::{
    auth::password::{hash_password, verify_password},
    error::{ApiError, internal},
    model::employee::Employee,
    views,
};
use actix_web::{HttpResponse, http::header, web};
use chrono::Utc;
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::info;

/// Assigned at creation when the form carries no password; stored hashed
/// like any other password, never in cleartext.
const DEFAULT_PASSWORD: &str = "123456";

const SELECT_SQL: &str = "SELECT * FROM employees";

const INSERT_SQL: &str = "INSERT INTO employees \
    (name, email, password, phone, address, start_date, salary, role) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

// Single atomic find-and-modify so two concurrent updates cannot interleave
// field-by-field. Deliberately touches neither id, password nor start_date.
const UPDATE_SQL: &str = "UPDATE employees SET \
    name = ?, email = ?, phone = ?, address = ?, position = ?, shift = ?, salary = ?, role = ? \
    WHERE id = ?";

const SEARCH_SQL: &str = "SELECT * FROM employees \
    WHERE LOWER(name) LIKE ? OR LOWER(phone) LIKE ? OR LOWER(email) LIKE ?";

// -------------------- Payloads --------------------

#[derive(Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
    pub phone: String,
    pub address: String,
    pub salary: f64,
    pub role: String,
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

#[derive(Deserialize)]
pub struct UpdateEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position: Option<String>,
    pub shift: Option<String>,
    pub salary: f64,
    pub role: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePassword {
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

// -------------------- Helpers --------------------

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn fetch_employee(pool: &MySqlPool, id: u64) -> Result<Employee, ApiError> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(internal("failed to fetch employee"))?
        .ok_or(ApiError::NotFound)
}

/// `%query%` with LIKE metacharacters escaped so they match literally,
/// lowercased to pair with the LOWER() columns in SEARCH_SQL.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// -------------------- Handlers --------------------

/// GET /employees — every record, store-native order, rendered as HTML.
pub async fn list_employees(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(SELECT_SQL)
        .fetch_all(pool.get_ref())
        .await
        .map_err(internal("failed to list employees"))?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::employee_list(&employees)))
}

/// POST /employees/add — hash the (possibly defaulted) password, stamp
/// start_date server-side, let the store assign the id.
pub async fn add_employee(
    pool: web::Data<MySqlPool>,
    form: web::Form<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let hashed = hash_password(&form.password).map_err(internal("failed to hash password"))?;

    sqlx::query(INSERT_SQL)
        .bind(&form.name)
        .bind(&form.email)
        .bind(&hashed)
        .bind(&form.phone)
        .bind(&form.address)
        .bind(Utc::now().naive_utc())
        .bind(form.salary)
        .bind(&form.role)
        .execute(pool.get_ref())
        .await
        .map_err(internal("failed to add employee"))?;

    info!(email = %form.email, "employee created");

    Ok(redirect_to("/employees"))
}

/// GET /employees/delete/{id} — hard delete. Running it twice yields a
/// redirect then a 404, never a second successful delete.
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(internal("failed to delete employee"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    info!(id, "employee deleted");

    Ok(redirect_to("/employees"))
}

/// GET /employees/update/{id} — same fetch contract as detail, different view.
pub async fn edit_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_employee(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::employee_edit(&employee)))
}

/// POST /employees/update/{id} — replace exactly the listed fields in one
/// atomic write; existence is checked by the write itself, not a prior read.
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    form: web::Form<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let result = sqlx::query(UPDATE_SQL)
        .bind(&form.name)
        .bind(&form.email)
        .bind(&form.phone)
        .bind(&form.address)
        .bind(&form.position)
        .bind(&form.shift)
        .bind(form.salary)
        .bind(&form.role)
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(internal("failed to update employee"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(redirect_to("/employees"))
}

/// GET /employees/detail/{id}
pub async fn detail_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_employee(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::employee_detail(&employee)))
}

/// GET /employees/search?q= — case-insensitive substring match against any
/// of name, phone, email; an absent or empty query degenerates to List.
/// Answers JSON rather than a rendered view.
pub async fn search_employees(
    pool: web::Data<MySqlPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let employees = match query.q.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => {
            let pattern = like_pattern(q);
            sqlx::query_as::<_, Employee>(SEARCH_SQL)
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(pool.get_ref())
                .await
        }
        None => {
            sqlx::query_as::<_, Employee>(SELECT_SQL)
                .fetch_all(pool.get_ref())
                .await
        }
    }
    .map_err(internal("failed to search employees"))?;

    Ok(HttpResponse::Ok().json(employees))
}

/// POST /employees/change-password/{employee_id} — fetch the addressed
/// record first, verify the current password against its stored hash, only
/// then persist the new hash. A mismatch mutates nothing.
pub async fn change_password(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    form: web::Form<ChangePassword>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let employee = fetch_employee(pool.get_ref(), id).await?;

    let matches = verify_password(&form.current_password, &employee.password)
        .map_err(internal("failed to verify current password"))?;

    if !matches {
        return Err(ApiError::Validation("Current password is incorrect".into()));
    }

    let hashed =
        hash_password(&form.new_password).map_err(internal("failed to hash new password"))?;

    sqlx::query("UPDATE employees SET password = ? WHERE id = ?")
        .bind(&hashed)
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(internal("failed to change password"))?;

    info!(id, "employee password changed");

    Ok(redirect_to(&format!("/employees/detail/{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::json;

    #[test]
    fn missing_password_falls_back_to_the_default() {
        let form: CreateEmployee = serde_json::from_value(json!({
            "name": "A",
            "email": "a@x.com",
            "phone": "555",
            "address": "Y",
            "salary": 100.0,
            "role": "staff"
        }))
        .unwrap();

        assert_eq!(form.password, DEFAULT_PASSWORD);

        let hash = hash_password(&form.password).unwrap();
        assert!(verify_password("123456", &hash).unwrap());
    }

    #[test]
    fn supplied_password_is_kept() {
        let form: CreateEmployee = serde_json::from_value(json!({
            "name": "A",
            "email": "a@x.com",
            "password": "hunter2",
            "phone": "555",
            "address": "Y",
            "salary": 100.0,
            "role": "staff"
        }))
        .unwrap();

        assert_eq!(form.password, "hunter2");
    }

    #[test]
    fn change_password_form_uses_camel_case_field_names() {
        let form: ChangePassword = serde_json::from_value(json!({
            "currentPassword": "old",
            "newPassword": "new"
        }))
        .unwrap();

        assert_eq!(form.current_password, "old");
        assert_eq!(form.new_password, "new");
    }

    #[test]
    fn like_pattern_lowercases_and_wraps() {
        assert_eq!(like_pattern("Jane"), "%jane%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn update_never_touches_credentials_or_start_date() {
        let set_clause = UPDATE_SQL
            .split_once("SET")
            .unwrap()
            .1
            .split_once("WHERE")
            .unwrap()
            .0;

        assert!(!set_clause.contains("password"));
        assert!(!set_clause.contains("start_date"));
        assert!(!set_clause.contains("id ="));
    }

    #[test]
    fn redirect_points_back_at_the_list() {
        let resp = redirect_to("/employees");
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/employees"
        );
    }
}
