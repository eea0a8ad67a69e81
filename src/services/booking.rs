// src/services/booking.rs

// Fluxo de agendamento do tatame:
//
//   (solicitação) -> pending -> confirmed
//                       |           |
//                       +--> (apagado: negado / cancelado) <--+
//
// Só existe um agendamento por (área, data, horário).

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{
        capabilities::{Actor, Capability},
        error::{AppError, BookingTransition},
    },
    models::tatame::{Booking, BookingRequest, BookingStatus, TatameArea},
};

pub fn slot_key(area_id: Uuid, date: NaiveDate, time_slot: &str) -> String {
    format!("{}|{}|{}", area_id, date, time_slot.trim())
}

/// Monta o registro `pending` de uma solicitação, ou recusa se o horário
/// não existe na área ou já está ocupado.
pub fn new_booking(
    area: &TatameArea,
    request: &BookingRequest,
    requester: &Actor,
    existing: &[Booking],
    now: DateTime<Utc>,
) -> Result<Booking, AppError> {
    let time_slot = request.time_slot.trim();

    if !area.time_slots.iter().any(|slot| slot == time_slot) {
        return Err(AppError::UnknownTimeSlot(time_slot.to_string()));
    }

    let key = slot_key(area.id, request.date, time_slot);
    if existing.iter().any(|b| b.slot_key == key) {
        return Err(AppError::SlotAlreadyRequested);
    }

    Ok(Booking {
        id: Uuid::new_v4(),
        area_id: area.id,
        date: request.date,
        time_slot: time_slot.to_string(),
        slot_key: key,
        user_id: requester.id,
        user_name: requester.name.clone(),
        status: BookingStatus::Pending,
        created_at: now,
    })
}

#[derive(Debug, Clone)]
pub enum Confirmation {
    /// Precisa gravar o novo status.
    Update(Booking),
    /// Já estava confirmado; nada a fazer.
    AlreadyConfirmed(Booking),
}

pub fn confirm(booking: &Booking) -> Confirmation {
    match booking.status {
        BookingStatus::Pending => Confirmation::Update(Booking {
            status: BookingStatus::Confirmed,
            ..booking.clone()
        }),
        BookingStatus::Confirmed => Confirmation::AlreadyConfirmed(booking.clone()),
    }
}

pub fn check_deny(booking: &Booking) -> Result<(), AppError> {
    match booking.status {
        BookingStatus::Pending => Ok(()),
        BookingStatus::Confirmed => Err(AppError::InvalidBookingTransition(
            BookingTransition::DenyConfirmed,
        )),
    }
}

/// O solicitante cancela em qualquer status; a equipe só cancela os confirmados
/// (pendentes de outras pessoas são negados).
pub fn check_cancel(booking: &Booking, actor: &Actor) -> Result<(), AppError> {
    if booking.user_id == actor.id {
        return Ok(());
    }

    actor.require(Capability::ReviewBookings)?;

    match booking.status {
        BookingStatus::Confirmed => Ok(()),
        BookingStatus::Pending => Err(AppError::InvalidBookingTransition(
            BookingTransition::CancelOthersPending,
        )),
    }
}
