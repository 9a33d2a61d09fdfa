use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use sweep_core::ControllerEvent;
use sweep_logging::{sweep_debug, sweep_warn};

/// Fire-and-forget JSON-lines sink for controller events.
///
/// Without a target every event is dropped; write failures are logged at
/// debug level and otherwise ignored.
pub struct EventSink {
    out: Option<Box<dyn Write + Send>>,
}

impl EventSink {
    pub fn disabled() -> Self {
        Self { out: None }
    }

    /// Appends to `path`. An unopenable file disables the sink.
    pub fn open(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self::from_writer(file),
            Err(err) => {
                sweep_warn!("Event sink {} unavailable: {err}", path.display());
                Self::disabled()
            }
        }
    }

    pub fn from_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
        }
    }

    pub fn emit(&mut self, event: &ControllerEvent) {
        let Some(out) = self.out.as_mut() else {
            sweep_debug!("No event sink; dropped {event:?}");
            return;
        };
        if let Err(err) = write_line(out, event) {
            sweep_debug!("Could not deliver {event:?}: {err}");
        }
    }
}

fn write_line(out: &mut dyn Write, event: &ControllerEvent) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()
}
