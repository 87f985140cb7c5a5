//! Reshape a weatherapi.com forecast payload into a [`NormalizedReport`].

use chrono::{Days, NaiveDateTime};
use serde::Deserialize;
use serde_json::Number;

use crate::{
    config::Units,
    error::{Result, TempyError},
    model::{ForecastTable, NormalizedReport, RawWeatherPayload, WeatherTable},
};

/// Current-conditions labels, in display order.
pub const CURRENT_LABELS: [&str; 9] = [
    "temperature",
    "wind",
    "gusts",
    "pressure",
    "precipitation",
    "visibility",
    "humidity",
    "cloud cover",
    "UV index",
];

/// Per-day forecast labels, in display order.
pub const FORECAST_LABELS: [&str; 9] = [
    "average",
    "low",
    "high",
    "gusts",
    "total precipitation",
    "average visibility",
    "chance of rain",
    "chance of snow",
    "uv index",
];

pub const TODAY_TITLE: &str = "Today's Forecast";

const FORECAST_LEN: usize = 3;
const LOCALTIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    condition: WaCondition,
    is_day: u8,
    temp_f: Number,
    temp_c: Number,
    wind_mph: Number,
    wind_kph: Number,
    wind_dir: String,
    gust_mph: Number,
    gust_kph: Number,
    pressure_in: Number,
    pressure_mb: Number,
    precip_in: Number,
    precip_mm: Number,
    vis_miles: Number,
    vis_km: Number,
    humidity: Number,
    cloud: Number,
    uv: Number,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_f: Number,
    avgtemp_c: Number,
    mintemp_f: Number,
    mintemp_c: Number,
    maxtemp_f: Number,
    maxtemp_c: Number,
    maxwind_mph: Number,
    maxwind_kph: Number,
    totalprecip_in: Number,
    totalprecip_mm: Number,
    avgvis_miles: Number,
    avgvis_km: Number,
    daily_chance_of_rain: Number,
    daily_chance_of_snow: Number,
    uv: Number,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaPayload {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

/// Build the render-ready report for `units`.
pub fn normalize(payload: &RawWeatherPayload, units: Units) -> Result<NormalizedReport> {
    let data = WaPayload::deserialize(&payload.0)
        .map_err(|err| TempyError::MalformedResponse(err.to_string()))?;

    let localtime = NaiveDateTime::parse_from_str(&data.location.localtime, LOCALTIME_FORMAT)
        .map_err(|err| {
            TempyError::MalformedResponse(format!(
                "unparseable localtime '{}': {err}",
                data.location.localtime
            ))
        })?;

    let days = data.forecast.forecastday.get(..FORECAST_LEN).ok_or_else(|| {
        TempyError::MalformedResponse(format!(
            "expected {FORECAST_LEN} forecast days, got {}",
            data.forecast.forecastday.len()
        ))
    })?;

    let forecast = days
        .iter()
        .enumerate()
        .map(|(offset, day)| {
            Ok(ForecastTable {
                title: forecast_title(localtime, offset)?,
                table: forecast_table(&day.day, units),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(location = %data.location.name, %units, "normalized weather payload");

    Ok(NormalizedReport {
        location: format!("{}, {}", data.location.name, data.location.region),
        localtime: localtime.format("%A, %B %-d | %H:%M").to_string(),
        condition: data.current.condition.text.clone(),
        is_day: data.current.is_day != 0,
        current: current_table(&data.current, units)?,
        forecast,
    })
}

fn forecast_title(localtime: NaiveDateTime, offset: usize) -> Result<String> {
    if offset == 0 {
        return Ok(TODAY_TITLE.to_string());
    }

    let date = localtime
        .date()
        .checked_add_days(Days::new(offset as u64))
        .ok_or_else(|| TempyError::MalformedResponse(format!("date overflow adding {offset} days")))?;

    Ok(date.format("%A, %B %-d").to_string())
}

fn current_table(current: &WaCurrent, units: Units) -> Result<WeatherTable> {
    let mut table = WeatherTable::default();

    match units {
        Units::Imperial => {
            table.push("temperature", format!("{}°F", current.temp_f));
            table.push("wind", format!("{} mph {}", current.wind_mph, current.wind_dir));
            table.push("gusts", format!("{} mph", current.gust_mph));
            table.push("pressure", format!("{} inHg", current.pressure_in));
            table.push("precipitation", format!("{} in", current.precip_in));
            table.push("visibility", format!("{} mi", current.vis_miles));
        }
        Units::Metric => {
            table.push("temperature", format!("{}°C", current.temp_c));
            table.push("wind", format!("{} kph {}", current.wind_kph, current.wind_dir));
            table.push("gusts", format!("{} kph", current.gust_kph));
            table.push("pressure", format!("{} mb", truncate(&current.pressure_mb)?));
            table.push("precipitation", format!("{} mm", current.precip_mm));
            table.push("visibility", format!("{} km", current.vis_km));
        }
    }

    table.push("humidity", format!("{}%", current.humidity));
    table.push("cloud cover", format!("{}%", current.cloud));
    table.push("UV index", current.uv.to_string());

    Ok(table)
}

fn forecast_table(day: &WaDay, units: Units) -> WeatherTable {
    let mut table = WeatherTable::default();

    match units {
        Units::Imperial => {
            table.push("average", format!("{}°F", day.avgtemp_f));
            table.push("low", format!("{}°F", day.mintemp_f));
            table.push("high", format!("{}°F", day.maxtemp_f));
            table.push("gusts", format!("{} mph", day.maxwind_mph));
            table.push("total precipitation", format!("{} in", day.totalprecip_in));
            table.push("average visibility", format!("{} mi", day.avgvis_miles));
        }
        Units::Metric => {
            table.push("average", format!("{}°C", day.avgtemp_c));
            table.push("low", format!("{}°C", day.mintemp_c));
            table.push("high", format!("{}°C", day.maxtemp_c));
            table.push("gusts", format!("{} kph", day.maxwind_kph));
            table.push("total precipitation", format!("{} mm", day.totalprecip_mm));
            table.push("average visibility", format!("{} km", day.avgvis_km));
        }
    }

    table.push("chance of rain", format!("{}%", day.daily_chance_of_rain));
    table.push("chance of snow", format!("{}%", day.daily_chance_of_snow));
    table.push("uv index", day.uv.to_string());

    table
}

/// Millibars are shown without a fractional part.
fn truncate(value: &Number) -> Result<i64> {
    if let Some(int) = value.as_i64() {
        return Ok(int);
    }
    value
        .as_f64()
        .map(|float| float.trunc() as i64)
        .ok_or_else(|| TempyError::MalformedResponse(format!("pressure out of range: {value}")))
}
