//! Console host for the standard externals.

use std::thread;
use std::time::Duration;

use pb_runtime::{Completer, StdHost, Value};

/// Writes program output to stdout; `wait` completes from a timer thread.
#[derive(Debug, Default)]
pub struct ConsoleHost;

impl StdHost for ConsoleHost {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn alert(&mut self, text: &str) {
        println!("[alert] {}", text);
    }

    fn schedule(&mut self, millis: f64, completer: Completer, value: Value) {
        let delay = if millis.is_finite() && millis > 0.0 {
            Duration::from_secs_f64(millis / 1000.0)
        } else {
            Duration::ZERO
        };
        thread::spawn(move || {
            thread::sleep(delay);
            completer.complete(value);
        });
    }
}
