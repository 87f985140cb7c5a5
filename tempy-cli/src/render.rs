//! Plain-text rendering of a [`NormalizedReport`].

use std::fmt;
use tempy_core::{NormalizedReport, WeatherTable};

/// Display adapter: header, current conditions, then one table per forecast day.
pub struct TextReport<'a>(pub &'a NormalizedReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let time_of_day = if report.is_day { "day" } else { "night" };

        writeln!(f, "{}", report.location)?;
        writeln!(f, "{}", report.localtime)?;
        writeln!(f, "{} ({time_of_day})", title_case(&report.condition))?;

        write_table(f, "Current Conditions", &report.current)?;
        for day in &report.forecast {
            write_table(f, &day.title, &day.table)?;
        }

        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, title: &str, table: &WeatherTable) -> fmt::Result {
    let width = table.labels().map(|label| label.chars().count()).max().unwrap_or(0);

    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))?;
    for row in table.rows() {
        writeln!(f, "{:<width$}  {}", title_case(&row.label), row.value)?;
    }

    Ok(())
}

/// Upper-case the first letter of every word, leaving the rest alone (`UV index` -> `UV Index`).
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
