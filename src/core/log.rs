use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour for each audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "flush" => Colour::Green,
        "undo" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]")
            .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: Option<String> = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target.unwrap_or_default(), message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        println!("📜 Internal log:\n");

        if entries.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op.len() + target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(60);

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);

            let mut cell = color.paint(operation.as_str()).to_string();
            if !target.is_empty() {
                cell.push_str(&format!(" ({target})"));
            }

            // Truncate to 60 visible chars; only the operation keeps its colour.
            let visible = strip_ansi(&ansi, &cell);
            if visible.chars().count() > 60 {
                let mut s: String = visible.chars().take(57).collect();
                s.push_str("...");
                cell = match s.split_once(' ') {
                    Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                    None => color.paint(s.as_str()).to_string(),
                };
            }

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&ansi, &cell).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                cell,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
