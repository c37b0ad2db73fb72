//! Recurring timer for the interactive session loop.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Send `make()` on `tx` every `every`, until the receiving side is gone.
pub fn spawn_ticker<T, F>(every: Duration, tx: Sender<T>, make: F) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Fn() -> T + Send + 'static,
{
    thread::spawn(move || {
        loop {
            thread::sleep(every);
            if tx.send(make()).is_err() {
                break;
            }
        }
    })
}
