use crate::error::app_error::ErrorBody;
use rocket::serde::json::Json;
use rocket::{Request, catch};

// Bodies for failures raised before a handler runs (guards, parsing, routing).

#[catch(400)]
pub fn bad_request(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Requisição inválida"))
}

#[catch(401)]
pub fn unauthorized(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Não autenticado"))
}

#[catch(403)]
pub fn forbidden(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Acesso negado"))
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Não encontrado"))
}

#[catch(409)]
pub fn conflict(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Conflito"))
}

#[catch(500)]
pub fn internal_error(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Erro interno do servidor"))
}
