use chrono::Local;
use weather_core::{IconCategory, QueryOutcome, QuerySnapshot, WeatherRecord};

pub fn snapshot(snapshot: &QuerySnapshot) -> String {
    match &snapshot.outcome {
        Some(QueryOutcome::Success(record)) => record_lines(record),
        Some(QueryOutcome::Failed(failure)) => failure.message(),
        None if snapshot.is_pending() => "Fetching weather...".to_string(),
        None => "No weather loaded yet.".to_string(),
    }
}

fn record_lines(record: &WeatherRecord) -> String {
    let icon = IconCategory::classify(record.feels_like_c);

    let mut out = format!(
        "{} {}\n\
         Temperature: {}°C\n\
         Feels like: {}°C\n\
         Weather: {}\n\
         Wind: {} m/s\n\
         Humidity: {}%",
        record.location_name,
        icon.glyph(),
        record.temperature_c,
        record.feels_like_c,
        record.condition,
        record.wind_speed,
        record.humidity_pct,
    );

    if let Some(observed) = record.observed_at {
        let local = observed.with_timezone(&Local);
        out.push_str(&format!("\nObserved: {}", local.format("%Y-%m-%d %H:%M")));
    }

    out
}
