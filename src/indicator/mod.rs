use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(100);

/// Terminal busy indicator: one background thread rewriting a single
/// line (`\r<glyph> <label>`) every 100ms until stopped.
///
/// The running flag is the only state shared with the tick thread: one
/// writer (`stop`), one reader (the loop), so an atomic bool with
/// release/acquire ordering is enough. `stop` joins the thread and
/// blanks the line; after it returns the indicator writes nothing more.
/// Starting a second indicator while one is live is not supported.
pub struct BusyIndicator {
  running: Arc<AtomicBool>,
  handle: Option<JoinHandle<()>>,
}

impl BusyIndicator {
  pub fn start(label: &str) -> Self {
    Self::start_with(label, std::io::stdout())
  }

  /// Same as `start` but with an explicit output sink.
  pub fn start_with<W: Write + Send + 'static>(label: &str, mut out: W) -> Self {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    let label = label.to_string();
    let handle = std::thread::spawn(move || {
      let mut frame = 0usize;
      while flag.load(Ordering::Acquire) {
        let _ = write!(out, "\r{} {}", FRAMES[frame % FRAMES.len()], label);
        let _ = out.flush();
        frame += 1;
        std::thread::sleep(TICK);
      }
      // Overwrite the glyph, the space and the label with blanks.
      let blank = " ".repeat(label.chars().count() + 2);
      let _ = write!(out, "\r{}\r", blank);
      let _ = out.flush();
    });
    BusyIndicator {
      running,
      handle: Some(handle),
    }
  }

  pub fn stop(&mut self) {
    self.running.store(false, Ordering::Release);
    if let Some(handle) = self.handle.take() {
      let _ = handle.join();
    }
  }
}

impl Drop for BusyIndicator {
  fn drop(&mut self) {
    self.stop();
  }
}
