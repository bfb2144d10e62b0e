//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `volutrack_core` linkage and storage bootstrap end to end.
//! - Keep output deterministic apart from generated guest ids (not printed).

use volutrack_core::db::open_db_in_memory;
use volutrack_core::{GuestSession, SqliteKvGateway};

fn main() {
    println!("volutrack_core ping={}", volutrack_core::ping());
    println!("volutrack_core version={}", volutrack_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("storage bootstrap failed: {err}");
            std::process::exit(1);
        }
    };
    let session = GuestSession::open_default(SqliteKvGateway::new(&conn));
    let counts = session.counts();
    println!(
        "roster total={} attending={} unconfirmed={}",
        counts.total, counts.attending, counts.unconfirmed
    );

    match session.export_csv() {
        Ok(csv) => print!("{csv}"),
        Err(err) => {
            eprintln!("export failed: {err}");
            std::process::exit(1);
        }
    }
}
