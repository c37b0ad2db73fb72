use crate::db::pool::DbPool;
use crate::db::queries::DaySource;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, source: DaySource) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE
    //
    let db_path = pool.address.describe();
    let file_size = fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• Store:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROWS PER KIND
    //
    let (rows, total, operational): (i64, i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN kind = 'total' THEN count END), 0),
                COALESCE(SUM(CASE WHEN kind = 'operational' THEN count END), 0)
         FROM footfall",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    println!("{}• Rows:{} {}{}{}", CYAN, RESET, GREEN, rows, RESET);
    println!("{}• Walk-ins:{} {}", CYAN, RESET, total);
    println!("{}• Operational:{} {}", CYAN, RESET, operational);

    //
    // 3) DAY RANGE
    //
    // Not-yet-migrated stores derive the day from created_at.
    let first_day: Option<String> = pool
        .conn
        .query_row(&format!("SELECT MIN({}) FROM footfall", source.sql()), [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_day: Option<String> = pool
        .conn
        .query_row(&format!("SELECT MAX({}) FROM footfall", source.sql()), [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Day range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE WALK-INS/DAY
    //
    if let (Some(f), Some(l)) = (first_day, last_day) {
        let d1 = parse_day(&f)?;
        let d2 = parse_day(&l)?;
        let days = (d2 - d1).num_days() + 1;

        let avg = total as f64 / days as f64;
        println!("{}• Average walk-ins/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_day(day_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(day_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
