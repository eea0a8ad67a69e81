// src/models/classes.rs

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "weekday", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }

    // Código RFC 5545 (BYDAY)
    pub fn ical_code(self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }
}

/// Aula semanal recorrente.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: Uuid,

    #[schema(example = "Jiu-Jitsu Adulto")]
    pub name: String,

    pub day_of_week: Weekday,

    #[schema(value_type = String, example = "19:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "20:30:00")]
    pub end_time: NaiveTime,

    #[schema(example = "Mestre Carlos")]
    pub instructor: String,

    #[schema(example = "Iniciante")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_class_times"))]
pub struct ClassPayload {
    #[validate(length(min = 1, message = "O nome da aula é obrigatório."))]
    pub name: String,

    pub day_of_week: Weekday,

    #[schema(value_type = String, example = "19:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "20:30:00")]
    pub end_time: NaiveTime,

    #[validate(length(min = 1, message = "O instrutor é obrigatório."))]
    pub instructor: String,

    #[serde(default)]
    pub level: String,
}

fn validate_class_times(payload: &ClassPayload) -> Result<(), ValidationError> {
    if payload.start_time >= payload.end_time {
        let mut err = ValidationError::new("class_times");
        err.message = Some("O horário de término deve ser depois do início.".into());
        return Err(err);
    }
    Ok(())
}

impl ClassSession {
    pub fn from_payload(id: Uuid, payload: ClassPayload) -> Self {
        Self {
            id,
            name: payload.name,
            day_of_week: payload.day_of_week,
            start_time: payload.start_time,
            end_time: payload.end_time,
            instructor: payload.instructor,
            level: payload.level,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarLink {
    #[schema(example = "https://calendar.google.com/calendar/render?action=TEMPLATE&text=Jiu-Jitsu")]
    pub url: String,
}
