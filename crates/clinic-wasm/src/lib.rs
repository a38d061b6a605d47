//! WASM bindings for schedule-engine and table-engine.
//!
//! Exposes appointment grouping and table-view assembly to the browser via
//! `wasm-bindgen`. All complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p clinic-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/clinic-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/clinic_wasm.wasm
//! ```

use chrono::NaiveDate;
use schedule_engine::{Appointment, AppointmentGroup, GroupingOptions};
use serde::Serialize;
use table_engine::{ColumnConfig, TableOptions, TableState};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GroupDto<'a> {
    start: String,
    end: String,
    duration_minutes: i64,
    appointments: &'a [Appointment],
}

impl<'a> From<&'a AppointmentGroup<Appointment>> for GroupDto<'a> {
    fn from(g: &'a AppointmentGroup<Appointment>) -> Self {
        Self {
            start: g.start_time.to_rfc3339(),
            end: g.end_time.to_rfc3339(),
            duration_minutes: g.duration_minutes(),
            appointments: &g.appointments,
        }
    }
}

// ---------------------------------------------------------------------------
// Boundary helpers
// ---------------------------------------------------------------------------

/// Parse an optional JSON argument, falling back to the type's default when
/// JavaScript passes `undefined`, `null` or an empty string.
fn parse_optional<T>(json: Option<&str>, what: &str) -> Result<T, String>
where
    T: serde::de::DeserializeOwned + Default,
{
    match json.map(str::trim) {
        None | Some("") | Some("null") => Ok(T::default()),
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn group_json(
    appointments_json: &str,
    date: &str,
    timezone: &str,
    options_json: Option<&str>,
) -> Result<String, String> {
    let appointments: Vec<Appointment> = serde_json::from_str(appointments_json)
        .map_err(|e| format!("Invalid appointments JSON: {}", e))?;
    schedule_engine::validate_appointments(&appointments).map_err(|e| e.to_string())?;

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))?;
    let options: GroupingOptions = parse_optional(options_json, "grouping options")?;

    let groups = schedule_engine::group_appointments_on(&appointments, date, timezone, &options)
        .map_err(|e| e.to_string())?;

    let dtos: Vec<GroupDto<'_>> = groups.iter().map(GroupDto::from).collect();
    to_json(&dtos)
}

fn table_view_json(
    rows_json: &str,
    columns_json: Option<&str>,
    options_json: Option<&str>,
    state_json: Option<&str>,
) -> Result<String, String> {
    let rows = table_engine::rows_from_json(rows_json).map_err(|e| e.to_string())?;
    let columns: Option<Vec<ColumnConfig>> = parse_optional(columns_json, "columns")?;
    let options: TableOptions = parse_optional(options_json, "table options")?;
    let state: TableState = parse_optional(state_json, "table state")?;

    let view = table_engine::build_view(&rows, columns.as_deref(), &options, &state);
    to_json(&view)
}

fn detect_columns_json(rows_json: &str) -> Result<String, String> {
    let rows = table_engine::rows_from_json(rows_json).map_err(|e| e.to_string())?;
    to_json(&table_engine::resolve_columns(None, &rows, true, false))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Group one day's appointments into calendar blocks.
///
/// Returns a JSON array of `{start, end, duration_minutes, appointments}`
/// objects. Each appointment keeps every field it was given.
///
/// # Arguments
/// - `appointments_json` -- JSON array of `{id, start, end, ...}` objects
/// - `date` -- the calendar day, `YYYY-MM-DD`
/// - `timezone` -- IANA timezone of the clinic (e.g., "Europe/Berlin")
/// - `options_json` -- optional `{max_group_duration_minutes, treat_touching_as_overlap}`
#[wasm_bindgen(js_name = "groupAppointments")]
pub fn group_appointments(
    appointments_json: &str,
    date: &str,
    timezone: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    group_json(appointments_json, date, timezone, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Build the visible page of a data table.
///
/// `columns_json`, `options_json` and `state_json` may be omitted; columns are
/// then detected from the first row and defaults apply.
#[wasm_bindgen(js_name = "tableView")]
pub fn table_view(
    rows_json: &str,
    columns_json: Option<String>,
    options_json: Option<String>,
    state_json: Option<String>,
) -> Result<String, JsValue> {
    table_view_json(
        rows_json,
        columns_json.as_deref(),
        options_json.as_deref(),
        state_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Columns auto-detected from the first row of `rows_json`.
#[wasm_bindgen(js_name = "detectColumns")]
pub fn detect_columns(rows_json: &str) -> Result<String, JsValue> {
    detect_columns_json(rows_json).map_err(|e| JsValue::from_str(&e))
}

/// Ids of every row on the given page in display order, as a JSON array of
/// strings.
#[wasm_bindgen(js_name = "selectAll")]
pub fn select_all(page_len: usize, page: usize, page_size: usize) -> String {
    let ids: Vec<String> = table_engine::page_ids(page_len, page, page_size).collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}
