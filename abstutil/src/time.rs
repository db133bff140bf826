use instant::Instant;

use crate::PROGRESS_FREQUENCY_SECONDS;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

struct Progress {
    label: String,
    processed_items: usize,
    total_items: usize,
    started_at: Instant,
    last_printed_at: Instant,
}

impl Progress {
    fn new(label: &str, total_items: usize) -> Progress {
        Progress {
            label: label.to_string(),
            processed_items: 0,
            total_items,
            started_at: Instant::now(),
            last_printed_at: Instant::now(),
        }
    }

    // Returns when done
    fn next(&mut self) -> Option<(f64, String)> {
        self.processed_items += 1;
        if self.processed_items > self.total_items {
            panic!(
                "{} is too few items for {} progress",
                prettyprint_usize(self.total_items),
                self.label
            );
        }

        if self.processed_items == self.total_items {
            let elapsed = elapsed_seconds(self.started_at);
            let line = format!(
                "{} ({})... {}",
                self.label,
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed)
            );
            info!("{}", line);
            return Some((elapsed, line));
        } else if elapsed_seconds(self.last_printed_at) >= PROGRESS_FREQUENCY_SECONDS {
            self.last_printed_at = Instant::now();
            info!(
                "{}: {}/{}... {}",
                self.label,
                prettyprint_usize(self.processed_items),
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed_seconds(self.started_at))
            );
        }
        None
    }
}

enum StackEntry {
    TimerSpan(TimerSpan),
    Progress(Progress),
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

/// Hierarchial timing of phases and iterations, reported through the `log` crate. Warnings
/// collected along the way are repeated when the Timer is dropped, so they don't scroll away.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<StackEntry>,

    outermost_name: String,

    warnings: Vec<String>,
}

impl Timer {
    pub fn new(name: &str) -> Timer {
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.to_string(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    pub fn warn(&mut self, line: String) {
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    // Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start(&mut self, name: &str) {
        info!("{}...", name);
        self.stack.push(StackEntry::TimerSpan(TimerSpan {
            name: name.to_string(),
            started_at: Instant::now(),
            nested_results: Vec::new(),
        }));
    }

    pub fn stop(&mut self, name: &str) {
        let span = match self.stack.pop() {
            Some(StackEntry::TimerSpan(s)) => s,
            _ => panic!("Can't stop({}) while a Progress is top of the stack", name),
        };
        assert_eq!(span.name, name);
        let elapsed = elapsed_seconds(span.started_at);
        let line = format!("{} took {}", name, prettyprint_time(elapsed));

        let padding = "  ".repeat(self.stack.len());
        match self.stack.last_mut() {
            Some(StackEntry::TimerSpan(ref mut s)) => {
                s.nested_results.push(format!("{}- {}", padding, line));
                s.nested_results.extend(span.nested_results);
            }
            Some(_) => unreachable!(),
            None => {
                self.results.push(format!("{}- {}", padding, line));
                self.results.extend(span.nested_results);
            }
        }

        info!("{}", line);
    }

    pub fn start_iter(&mut self, name: &str, total_items: usize) {
        if total_items == 0 {
            return;
        }
        if let Some(StackEntry::Progress(p)) = self.stack.last() {
            panic!(
                "Can't start_iter({}) while Progress({}) is top of the stack",
                name, p.label
            );
        }

        self.stack
            .push(StackEntry::Progress(Progress::new(name, total_items)));
    }

    pub fn next(&mut self) {
        let maybe_result =
            if let Some(StackEntry::Progress(ref mut progress)) = self.stack.last_mut() {
                progress.next()
            } else {
                panic!("Can't next() while a TimerSpan is top of the stack");
            };
        if let Some((_, result)) = maybe_result {
            self.stack.pop();
            self.add_result(result);
        }
    }

    fn add_result(&mut self, line: String) {
        let padding = "  ".repeat(self.stack.len());
        match self.stack.last_mut() {
            Some(StackEntry::TimerSpan(ref mut s)) => {
                s.nested_results.push(format!("{}- {}", padding, line));
            }
            Some(_) => unreachable!(),
            None => {
                self.results.push(format!("{}- {}", padding, line));
            }
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let stop_name = self.outermost_name.clone();

        // If we're in the middle of unwinding a panic, don't further blow up.
        match self.stack.last() {
            Some(StackEntry::TimerSpan(ref s)) => {
                if s.name != stop_name {
                    error!("dropping Timer because of panic");
                    return;
                }
            }
            Some(_) => {
                error!("dropping Timer because of panic");
                return;
            }
            None => return,
        }

        self.stop(&stop_name);
        for line in &self.results {
            info!("{}", line);
        }

        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usize_gets_thousands_separators() {
        assert_eq!(prettyprint_usize(0), "0");
        assert_eq!(prettyprint_usize(999), "999");
        assert_eq!(prettyprint_usize(1000), "1,000");
        assert_eq!(prettyprint_usize(1234567), "1,234,567");
    }

    #[test]
    fn nested_phases_and_iterations() {
        let mut timer = Timer::new("outer");
        timer.start("load");
        timer.stop("load");
        timer.start_iter("check", 3);
        for _ in 0..3 {
            timer.next();
        }
        timer.warn("something odd".to_string());
        assert_eq!(timer.warnings().len(), 1);
        // Empty iterations are no-ops, so next() must not be called
        timer.start_iter("nothing", 0);
        timer.done();
    }

    #[test]
    #[should_panic]
    fn mismatched_stop() {
        let mut timer = Timer::throwaway();
        timer.start("a");
        timer.stop("b");
    }
}
