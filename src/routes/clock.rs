use crate::error::app_error::AppError;
use crate::models::clock::ClockResponse;
use crate::timezone::{
    FormatOptions, Style, TIMEZONE, format_in_brazil_time, start_of_day_in_brazil, to_brazil_time, utc_offset_hours,
};
use chrono::{DateTime, Utc};
use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

fn parse_instant(raw: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match raw {
        None => Ok(Utc::now()),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|_| AppError::BadRequest(format!("Data inválida: {}", value))),
    }
}

/// São Paulo wall clock and start of the local day, for `at` (RFC 3339) or now
#[openapi(tag = "Clock")]
#[get("/?<at>")]
pub fn get_clock(at: Option<&str>) -> Result<Json<ClockResponse>, AppError> {
    let instant = parse_instant(at)?;
    let formatted = format_in_brazil_time(instant, &FormatOptions::date_time(Style::Short, Style::Medium))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ClockResponse {
        timezone: TIMEZONE.name().to_string(),
        instant,
        local: to_brazil_time(instant),
        start_of_day: start_of_day_in_brazil(instant),
        utc_offset_hours: utc_offset_hours(instant),
        formatted,
    }))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_clock]
}

#[cfg(test)]
mod tests {
    use super::parse_instant;
    use crate::{Config, build_rocket};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use serde_json::Value;

    #[test]
    fn parse_instant_rejects_garbage() {
        assert!(parse_instant(Some("ontem")).is_err());
        assert!(parse_instant(None).is_ok());
    }

    #[rocket::async_test]
    async fn clock_reports_local_day_for_given_instant() {
        let client = Client::tracked(build_rocket(Config::default())).await.expect("valid rocket instance");
        let response = client.get("/api/clock?at=2026-10-15T02:30:00Z").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["timezone"], "America/Sao_Paulo");
        assert_eq!(body["local"]["day"], 14);
        assert_eq!(body["local"]["hour"], 23);
        assert_eq!(body["start_of_day"], "2026-10-14T03:00:00Z");
        assert_eq!(body["utc_offset_hours"], -3);
        assert_eq!(body["formatted"], "14/10/2026, 23:30:00");
    }

    #[rocket::async_test]
    async fn clock_rejects_invalid_instant() {
        let client = Client::tracked(build_rocket(Config::default())).await.expect("valid rocket instance");
        let response = client.get("/api/clock?at=amanha").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
    }
}
