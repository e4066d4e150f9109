use std::io::{self, Write};
use std::sync::Mutex;

pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    write_line(&mut io::stdout(), message, writer)
}

pub fn eprintln(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    write_line(&mut io::stderr(), message, writer)
}

/// Writes `message` to `primary` and mirrors it into `writer`.
///
/// The mirror is written even when `primary` fails; the first error wins.
fn write_line(
    primary: &mut dyn Write,
    message: &str,
    writer: &mut Option<&mut dyn Write>,
) -> io::Result<()> {
    let primary_result = writeln!(primary, "{message}");

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    primary_result
}

/// Progress reporter shared by concurrently running label checks.
///
/// Every line goes to stdout (or stderr for errors) and is mirrored into the
/// optional extra writer. Write failures on either side are logged and
/// otherwise ignored, so reporting never changes control flow.
pub struct Console<'a> {
    additional: Mutex<Option<&'a mut dyn Write>>,
}

impl<'a> Console<'a> {
    pub fn new(additional: Option<&'a mut dyn Write>) -> Self {
        Console {
            additional: Mutex::new(additional),
        }
    }

    pub fn println(&self, message: &str) {
        let mut writer = self.additional.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = println(message, &mut writer) {
            tracing::warn!(error = %e, "Failed to write console output");
        }
    }

    pub fn error(&self, message: &str) {
        let mut writer = self.additional.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = eprintln(message, &mut writer) {
            tracing::warn!(error = %e, "Failed to write console output");
        }
    }
}
