//! 问候处理器

use axum::{extract::rejection::JsonRejection, response::Json};

use super::model::{Greeting, Person};
use crate::core::error::CoreError;

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn greet(
    payload: Result<Json<Person>, JsonRejection>,
) -> Result<Json<Greeting>, CoreError> {
    let Json(person) = payload?;
    Ok(Json(Greeting::for_person(&person)))
}
