// src/services/calendar.rs

//! Exportação da grade de aulas: documento iCalendar (RFC 5545) com um
//! evento semanal recorrente por aula, e link "adicionar à agenda" do
//! Google Agenda para uma aula específica.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::models::classes::ClassSession;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

/// Próxima data em que a aula acontece a partir de `now`. Se for hoje e a
/// aula já começou, vai para a semana seguinte.
pub fn next_occurrence(class: &ClassSession, now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let target = class.day_of_week.to_chrono().num_days_from_monday() as i64;
    let current = today.weekday().num_days_from_monday() as i64;

    let mut days_ahead = (target - current).rem_euclid(7);
    if days_ahead == 0 && now.time() >= class.start_time {
        days_ahead = 7;
    }

    today + Duration::days(days_ahead)
}

fn ical_datetime(value: NaiveDateTime) -> String {
    value.format("%Y%m%dT%H%M%S").to_string()
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

// Linhas com mais de 75 octetos são dobradas (CRLF + espaço).
fn fold_line(line: &str) -> String {
    const LIMIT: usize = 75;
    if line.len() <= LIMIT {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / LIMIT * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > LIMIT {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}

fn description(class: &ClassSession) -> String {
    if class.level.trim().is_empty() {
        format!("Instrutor: {}", class.instructor)
    } else {
        format!("Instrutor: {}\nNível: {}", class.instructor, class.level)
    }
}

fn rrule(class: &ClassSession) -> String {
    format!("RRULE:FREQ=WEEKLY;BYDAY={}", class.day_of_week.ical_code())
}

/// Documento `.ics` com todas as aulas.
pub fn export_ics(
    classes: &[ClassSession],
    academy_name: &str,
    now: NaiveDateTime,
    stamp: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        format!("PRODID:-//{}//Grade de Aulas//PT", escape_text(academy_name)),
        "CALSCALE:GREGORIAN".into(),
        "METHOD:PUBLISH".into(),
        format!("X-WR-CALNAME:{}", escape_text(academy_name)),
    ];

    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for class in classes {
        let date = next_occurrence(class, now);
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}@academia", class.id));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("DTSTART:{}", ical_datetime(date.and_time(class.start_time))));
        lines.push(format!("DTEND:{}", ical_datetime(date.and_time(class.end_time))));
        lines.push(rrule(class));
        lines.push(format!("SUMMARY:{}", escape_text(&class.name)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&description(class))));
        lines.push(format!("LOCATION:{}", escape_text(academy_name)));
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());

    let mut out = lines
        .iter()
        .map(|line| fold_line(line))
        .collect::<Vec<_>>()
        .join("\r\n");
    out.push_str("\r\n");
    out
}

/// Link do Google Agenda com os campos do evento codificados na URL.
pub fn google_calendar_link(class: &ClassSession, academy_name: &str, now: NaiveDateTime) -> String {
    let date = next_occurrence(class, now);
    let dates = format!(
        "{}/{}",
        ical_datetime(date.and_time(class.start_time)),
        ical_datetime(date.and_time(class.end_time))
    );

    format!(
        "{}?action=TEMPLATE&text={}&dates={}&details={}&location={}&recur={}",
        GOOGLE_CALENDAR_URL,
        urlencoding::encode(&class.name),
        urlencoding::encode(&dates),
        urlencoding::encode(&description(class)),
        urlencoding::encode(academy_name),
        urlencoding::encode(&rrule(class)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::Weekday;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn class(day: Weekday, start: (u32, u32), end: (u32, u32)) -> ClassSession {
        ClassSession {
            id: Uuid::new_v4(),
            name: "Jiu-Jitsu, Adulto".into(),
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            instructor: "Mestre Carlos".into(),
            level: "Iniciante".into(),
        }
    }

    // 2024-03-13 é uma quarta-feira
    fn wednesday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn next_occurrence_later_this_week() {
        let friday = class(Weekday::Friday, (19, 0), (20, 30));
        assert_eq!(
            next_occurrence(&friday, wednesday_at(10, 0)),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn next_occurrence_wraps_to_next_week() {
        let monday = class(Weekday::Monday, (7, 0), (8, 0));
        assert_eq!(
            next_occurrence(&monday, wednesday_at(10, 0)),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
        );
    }

    #[test]
    fn same_day_before_start_is_today() {
        let wednesday = class(Weekday::Wednesday, (19, 0), (20, 0));
        assert_eq!(
            next_occurrence(&wednesday, wednesday_at(18, 59)),
            NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
        );
    }

    #[test]
    fn same_day_already_started_rolls_to_next_week() {
        let wednesday = class(Weekday::Wednesday, (19, 0), (20, 0));
        assert_eq!(
            next_occurrence(&wednesday, wednesday_at(19, 0)),
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
        );
        assert_eq!(
            next_occurrence(&wednesday, wednesday_at(19, 30)),
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
        );
    }

    #[test]
    fn ics_has_one_weekly_event_per_class() {
        let classes = vec![
            class(Weekday::Monday, (7, 0), (8, 0)),
            class(Weekday::Wednesday, (19, 0), (20, 30)),
        ];
        let ics = export_ics(&classes, "Academia Centro", wednesday_at(20, 0), Utc::now());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("END:VEVENT").count(), 2);
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=MO"));
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=WE"));
        assert!(ics.contains("DTSTART:20240318T070000"));
        // quarta 19h já começou às 20h: próxima quarta
        assert!(ics.contains("DTSTART:20240320T190000"));
        assert!(ics.contains("DTEND:20240320T203000"));
        assert!(ics.contains("SUMMARY:Jiu-Jitsu\\, Adulto"));
        assert!(ics.contains("DESCRIPTION:Instrutor: Mestre Carlos\\nNível: Iniciante"));
    }

    #[test]
    fn long_lines_are_folded() {
        let long = "X".repeat(200);
        let folded = fold_line(&long);
        assert!(folded.split("\r\n").all(|l| l.len() <= 75));
        assert_eq!(folded.replace("\r\n ", ""), long);
    }

    #[test]
    fn google_link_is_url_encoded() {
        let friday = class(Weekday::Friday, (19, 0), (20, 30));
        let link = google_calendar_link(&friday, "Academia Centro", wednesday_at(10, 0));

        assert!(link.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(link.contains("text=Jiu-Jitsu%2C%20Adulto"));
        assert!(link.contains("dates=20240315T190000%2F20240315T203000"));
        assert!(link.contains("recur=RRULE%3AFREQ%3DWEEKLY%3BBYDAY%3DFR"));
        assert!(link.contains("location=Academia%20Centro"));
    }
}
