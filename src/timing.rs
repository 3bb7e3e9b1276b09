//! Wall-clock instrumentation for expensive pipeline stages
//!
//! Wraps a unit of work, leaves its result (including any `Err`) untouched,
//! and writes one `info` line with the elapsed time once it returns. The
//! report is emitted from a drop guard, so it is also written if the work
//! panics.
//!
//! The `info` line carries no unit name so it lines up under the stage
//! header logged just before it. The name and elapsed time are repeated
//! at `debug` level.

use std::time::{Duration, Instant};

/// Column at which elapsed-time lines start, to line up under stage headers
pub const ELAPSED_INDENT: usize = 21;

/// Render the elapsed-time log line
pub fn format_elapsed(elapsed: Duration) -> String {
    format!(
        "{:indent$}Elapsed time: {:.6} seconds.",
        "",
        elapsed.as_secs_f64(),
        indent = ELAPSED_INDENT
    )
}

/// Scope guard that logs elapsed time when dropped
#[derive(Debug)]
pub struct Stopwatch {
    name: &'static str,
    start: Instant,
}

impl Stopwatch {
    /// Start timing a named unit of work
    pub fn start(name: &'static str) -> Self {
        tracing::debug!("timing {}", name);
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Name of the unit being timed
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Time since the stopwatch started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        tracing::info!("{}", format_elapsed(elapsed));
        tracing::debug!("{} took {:.6} s", self.name, elapsed.as_secs_f64());
    }
}

/// Run `f` and log how long it took
///
/// # Example
/// ```
/// use quakemig::timing::timeit;
///
/// let result: Result<u32, String> = timeit("parse", || Err("bad".to_string()));
/// assert_eq!(result, Err("bad".to_string()));
/// ```
pub fn timeit<F, R>(name: &'static str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _watch = Stopwatch::start(name);
    f()
}

/// A callable paired with the name it is reported under
///
/// The wrapper forwards arguments and return values unchanged; only the
/// timing line is added.
#[derive(Debug, Clone)]
pub struct Timed<F> {
    name: &'static str,
    inner: F,
}

impl<F> Timed<F> {
    /// Wrap `inner`, reporting it as `name`
    pub fn new(name: &'static str, inner: F) -> Self {
        Self { name, inner }
    }

    /// Name of the wrapped callable
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrow the wrapped callable
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwrap, dropping the instrumentation
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Call the wrapped function with `args` under a stopwatch
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        timeit(self.name, || (self.inner)(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture<R>(f: impl FnOnce() -> R) -> (R, String) {
        let sink = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, sink.contents())
    }

    #[test]
    fn test_format_elapsed() {
        let line = format_elapsed(Duration::from_micros(1_500_250));
        assert_eq!(
            line,
            format!("{}Elapsed time: 1.500250 seconds.", " ".repeat(21))
        );
    }

    #[test]
    fn test_timeit_returns_value() {
        let (value, log) = capture(|| timeit("add", || 2 + 2));
        assert_eq!(value, 4);
        assert!(log.contains("Elapsed time: "));
        assert!(log.contains(" seconds."));
        assert_eq!(log.matches("Elapsed time").count(), 1);
    }

    #[test]
    fn test_timeit_propagates_error_unchanged() {
        let (result, log) = capture(|| {
            timeit("fail", || -> Result<(), crate::error::QuakeError> {
                Err(crate::error::QuakeError::DataGap)
            })
        });
        assert_eq!(result, Err(crate::error::QuakeError::DataGap));
        assert!(log.contains("Elapsed time"));
    }

    #[test]
    fn test_stopwatch_names_unit_at_debug() {
        let sink = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_max_level(tracing::Level::DEBUG)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || timeit("stack_volume", || ()));

        let log = sink.contents();
        let elapsed = log.lines().find(|l| l.contains("Elapsed time")).unwrap();
        assert!(!elapsed.contains("stack_volume"));
        assert!(log.lines().any(|l| l.starts_with("stack_volume took ")));
    }

    #[test]
    fn test_stopwatch_elapsed() {
        let sink = Capture::default();
        let subscriber = tracing_subscriber::fmt().with_writer(sink).finish();
        tracing::subscriber::with_default(subscriber, || {
            let watch = Stopwatch::start("sleep");
            thread::sleep(Duration::from_millis(10));
            assert!(watch.elapsed() >= Duration::from_millis(10));
            assert_eq!(watch.name(), "sleep");
        });
    }

    #[test]
    fn test_timed_preserves_name_and_behaviour() {
        let double = Timed::new("double", |x: i32| x * 2);
        assert_eq!(double.name(), "double");
        let (value, log) = capture(|| double.call(21));
        assert_eq!(value, 42);
        assert!(log.contains("Elapsed time"));
        assert_eq!((double.into_inner())(5), 10);
    }

    #[test]
    fn test_timed_tuple_arguments() {
        let add = Timed::new("add", |(a, b): (f64, f64)| a + b);
        assert_eq!(add.call((1.5, 2.0)), 3.5);
        assert_eq!((add.inner())((1.0, 1.0)), 2.0);
    }

    #[test]
    fn test_stopwatch_reports_on_panic() {
        let sink = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();
        let outcome = tracing::subscriber::with_default(subscriber, || {
            std::panic::catch_unwind(|| timeit("boom", || panic!("boom")))
        });
        assert!(outcome.is_err());
        assert!(sink.contents().contains("Elapsed time"));
    }
}
