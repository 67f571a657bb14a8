use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::debug;

/// Keeps track of the time spent in named phases of a computation.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f64)>>>,
}

/// Measures a single phase, started by [Timing::start].
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f64)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Timing {
        Timing::default()
    }

    /// Starts a timer for the phase with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the measured phases in the order in which they finished.
    pub fn results(&self) -> Vec<(String, f64)> {
        self.results.borrow().clone()
    }

    /// Prints all measured phases to stderr.
    pub fn print(&self) {
        for (name, time) in self.results.borrow().iter() {
            eprintln!("Time {}: {:.3}s", name, time);
        }
    }
}

impl Timer {
    /// Stops the timer and registers the elapsed time.
    pub fn finish(&mut self) {
        if self.registered {
            return;
        }

        let time = self.start.elapsed().as_secs_f64();
        debug!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time));
        self.registered = true;
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.finish();
    }
}
