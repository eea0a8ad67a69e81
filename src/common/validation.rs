// src/common/validation.rs

// Validadores customizados usados pelos payloads (`#[validate(custom(...))]`).

use chrono::NaiveTime;
use rust_decimal::Decimal;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Interpreta um horário no formato `HH:MM - HH:MM`.
pub fn parse_time_slot(slot: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (start, end) = slot.split_once('-')?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    (start < end).then_some((start, end))
}

pub fn validate_time_slots(slots: &[String]) -> Result<(), ValidationError> {
    if slots.is_empty() {
        return Err(invalid("time_slots", "Informe ao menos um horário."));
    }
    if slots.iter().any(|s| parse_time_slot(s).is_none()) {
        return Err(invalid(
            "time_slot_format",
            "Os horários devem seguir o formato HH:MM - HH:MM.",
        ));
    }
    Ok(())
}

/// Imagens chegam como data URI em base64 e são gravadas no próprio registro.
pub fn validate_image_data_uri(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .is_some_and(|(mime, data)| !mime.is_empty() && !data.is_empty());

    if valid {
        Ok(())
    } else {
        Err(invalid("image", "A imagem deve ser um data URI (data:image/...;base64,...)."))
    }
}

/// A chave vai byte a byte no BR Code, que só aceita ASCII.
pub fn validate_pix_key(value: &str) -> Result<(), ValidationError> {
    if value.is_ascii() {
        Ok(())
    } else {
        Err(invalid("pix_key", "A chave PIX não pode ter acentos ou símbolos especiais."))
    }
}

pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(invalid("price", "O valor não pode ser negativo."));
    }
    Ok(())
}

pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(invalid("amount", "O valor deve ser maior que zero."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_slots() {
        let (start, end) = parse_time_slot("18:00 - 19:30").unwrap();
        assert_eq!(start, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert!(validate_time_slots(&["07:00 - 08:00".into(), "08:00-09:00".into()]).is_ok());
    }

    #[test]
    fn rejects_malformed_or_inverted_slots() {
        assert!(parse_time_slot("18h - 19h").is_none());
        assert!(parse_time_slot("19:00 - 18:00").is_none());
        assert!(parse_time_slot("25:00 - 26:00").is_none());
        assert!(validate_time_slots(&[]).is_err());
        assert!(validate_time_slots(&["manhã".into()]).is_err());
    }

    #[test]
    fn image_must_be_base64_data_uri() {
        assert!(validate_image_data_uri("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(validate_image_data_uri("https://example.com/logo.png").is_err());
        assert!(validate_image_data_uri("data:image/png;base64,").is_err());
    }

    #[test]
    fn pix_key_must_be_ascii() {
        assert!(validate_pix_key("+5581999990000").is_ok());
        assert!(validate_pix_key("financeiro@academia.com").is_ok());
        assert!(validate_pix_key("joão@academia.com").is_err());
    }
}
