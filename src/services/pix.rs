// src/services/pix.rs

// Payload PIX "copia e cola" (BR Code, padrão EMV-MPM do Banco Central) e
// o QR Code correspondente em SVG.

use qrcode::{render::svg, QrCode};
use rust_decimal::Decimal;

use crate::common::error::AppError;

const GUI: &str = "br.gov.bcb.pix";

// O template da conta (campo 26) tem no máximo 99 bytes: 18 do GUI e 4 do
// cabeçalho da chave.
pub const MAX_KEY_BYTES: usize = 77;

fn field(id: &str, value: &str) -> String {
    format!("{}{:02}{}", id, value.len(), value)
}

/// CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF), exigido no campo 63.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

// O BR Code só aceita ASCII nos campos de nome e cidade.
fn sanitize(value: &str, max_len: usize) -> String {
    value
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'ê' | 'è' => 'e',
            'É' | 'Ê' | 'È' => 'E',
            'í' | 'î' => 'i',
            'Í' | 'Î' => 'I',
            'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ü' => 'u',
            'Ú' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            c if c.is_ascii() => c,
            _ => ' ',
        })
        .take(max_len)
        .collect::<String>()
        .trim()
        .to_string()
}

#[derive(Debug, Clone)]
pub struct PixCharge<'a> {
    pub key: &'a str,
    pub merchant_name: &'a str,
    pub merchant_city: &'a str,
    pub amount: Decimal,
    pub txid: &'a str,
}

impl PixCharge<'_> {
    pub fn payload(&self) -> Result<String, AppError> {
        let key = self.key.trim();
        if key.is_empty() || !key.is_ascii() || key.len() > MAX_KEY_BYTES {
            return Err(AppError::GatewayNotConfigured);
        }
        let account = format!("{}{}", field("00", GUI), field("01", key));
        let amount = self.amount.round_dp(2);

        let mut payload = String::new();
        payload.push_str(&field("00", "01"));
        payload.push_str(&field("26", &account));
        payload.push_str(&field("52", "0000"));
        payload.push_str(&field("53", "986")); // BRL
        if amount > Decimal::ZERO {
            payload.push_str(&field("54", &format!("{:.2}", amount)));
        }
        payload.push_str(&field("58", "BR"));
        payload.push_str(&field("59", &sanitize(self.merchant_name, 25)));
        payload.push_str(&field("60", &sanitize(self.merchant_city, 15)));
        payload.push_str(&field("62", &field("05", &sanitize(self.txid, 25))));

        payload.push_str("6304");
        let crc = crc16(payload.as_bytes());
        payload.push_str(&format!("{:04X}", crc));
        Ok(payload)
    }
}

pub fn qr_svg(payload: &str) -> Result<String, AppError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build())
}
