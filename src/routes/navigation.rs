use crate::auth::CurrentUser;
use crate::models::navigation::NavigationResponse;
use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

/// Sidebar entries visible to the current user's role
#[openapi(tag = "Navigation")]
#[get("/")]
pub fn get_navigation(current_user: CurrentUser) -> Json<NavigationResponse> {
    Json(NavigationResponse::for_role(current_user.role))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_navigation]
}
