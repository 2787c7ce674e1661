//! Standard externals available to every program.

use crate::external::ExternalRegistry;
use crate::pending::{Completer, Pending};
use crate::value::Value;

/// What the standard externals need from the embedding host.
pub trait StdHost {
    /// Output of `print`.
    fn print(&mut self, text: &str);

    /// Output of `alert`.
    fn alert(&mut self, text: &str);

    /// Arranges for `completer` to receive `value` after `millis` milliseconds.
    fn schedule(&mut self, millis: f64, completer: Completer, value: Value);
}

/// Registers `print`, `alert`, `toString`, `length`, `charAt` and `wait`.
pub fn register_std<H: StdHost + 'static>(registry: &mut ExternalRegistry<H>) {
    // ==================== Output ====================

    for ty in ["string", "number", "boolean"] {
        registry.add_sync("print", &[("value", ty)], None, |host: &mut H, args| {
            host.print(&display_arg(args, 0));
            Value::Nothing
        });
    }
    for ty in ["string", "number", "boolean"] {
        registry.add_sync("alert", &[("message", ty)], None, |host: &mut H, args| {
            host.alert(&display_arg(args, 0));
            Value::Nothing
        });
    }

    // ==================== Strings ====================

    for ty in ["number", "boolean"] {
        registry.add_sync("toString", &[("value", ty)], Some("string"), |_, args| {
            Value::from(display_arg(args, 0))
        });
    }

    registry.add_sync("length", &[("value", "string")], Some("number"), |_, args| {
        let len = args.first().and_then(Value::as_str).map_or(0, |s| s.chars().count());
        Value::from(len as f64)
    });

    registry.add_sync(
        "charAt",
        &[("value", "string"), ("index", "number")],
        Some("string"),
        |_, args| {
            let text = args.first().and_then(Value::as_str).unwrap_or("");
            let index = args.get(1).and_then(Value::as_number).unwrap_or(f64::NAN);
            Value::from(char_at(text, index))
        },
    );

    // ==================== Timing ====================

    registry.add_async("wait", &[("milliSeconds", "number")], Some("number"), |host: &mut H, args| {
        let millis = args.first().and_then(Value::as_number).unwrap_or(0.0);
        let (pending, completer) = Pending::channel();
        host.schedule(millis, completer, Value::from(millis));
        pending
    });
}

fn display_arg(args: &[Value], index: usize) -> String {
    args.get(index).map(Value::to_string).unwrap_or_default()
}

/// Character at a (truncated) index, or the empty string when out of range.
fn char_at(text: &str, index: f64) -> String {
    let index = if index.is_nan() { 0.0 } else { index.trunc() };
    if index < 0.0 {
        return String::new();
    }
    text.chars()
        .nth(index as usize)
        .map(String::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::Callback;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        printed: Vec<String>,
        alerts: Vec<String>,
        scheduled: Vec<(f64, Completer, Value)>,
    }

    impl StdHost for Recorder {
        fn print(&mut self, text: &str) {
            self.printed.push(text.to_string());
        }

        fn alert(&mut self, text: &str) {
            self.alerts.push(text.to_string());
        }

        fn schedule(&mut self, millis: f64, completer: Completer, value: Value) {
            self.scheduled.push((millis, completer, value));
        }
    }

    fn call_sync(registry: &ExternalRegistry<Recorder>, host: &mut Recorder, sig: &str, args: &[Value]) -> Value {
        match &registry.lookup(sig).unwrap().callback {
            Callback::Sync(f) => f(host, args),
            Callback::Async(_) => panic!("{} is async", sig),
        }
    }

    #[test]
    fn test_std_signatures() {
        let mut registry = ExternalRegistry::<Recorder>::new();
        register_std(&mut registry);
        for sig in [
            "print(string)",
            "print(number)",
            "print(boolean)",
            "alert(string)",
            "toString(number)",
            "toString(boolean)",
            "length(string)",
            "charAt(string,number)",
            "wait(number)",
        ] {
            assert!(registry.lookup(sig).is_some(), "missing {}", sig);
        }
        assert!(registry.lookup("wait(number)").unwrap().is_async());
    }

    #[test]
    fn test_std_behaviour() {
        let mut registry = ExternalRegistry::<Recorder>::new();
        register_std(&mut registry);
        let mut host = Recorder::default();

        call_sync(&registry, &mut host, "print(number)", &[Value::from(5.0)]);
        call_sync(&registry, &mut host, "alert(boolean)", &[Value::from(true)]);
        assert_eq!(host.printed, vec!["5"]);
        assert_eq!(host.alerts, vec!["true"]);

        let s = call_sync(&registry, &mut host, "toString(number)", &[Value::from(1.5)]);
        assert_eq!(s, Value::from("1.5"));
        let n = call_sync(&registry, &mut host, "length(string)", &[Value::from("héllo")]);
        assert_eq!(n, Value::from(5.0));
        let c = call_sync(&registry, &mut host, "charAt(string,number)", &[Value::from("abc"), Value::from(1.0)]);
        assert_eq!(c, Value::from("b"));
        let none = call_sync(&registry, &mut host, "charAt(string,number)", &[Value::from("abc"), Value::from(7.0)]);
        assert_eq!(none, Value::from(""));
    }

    #[test]
    fn test_wait_schedules_completion() {
        let mut registry = ExternalRegistry::<Recorder>::new();
        register_std(&mut registry);
        let mut host = Recorder::default();
        let Callback::Async(wait) = &registry.lookup("wait(number)").unwrap().callback else {
            panic!("wait should be async");
        };
        let pending = wait(&mut host, &[Value::from(10.0)]);
        assert!(!pending.is_complete());
        let (millis, completer, value) = host.scheduled.pop().unwrap();
        assert_eq!(millis, 10.0);
        completer.complete(value);
        assert_eq!(pending.try_take(), Some(Value::from(10.0)));
    }
}
