use std::{backtrace::Backtrace, panic};

/// Routes panics through `tracing` instead of stderr.
pub fn set_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");

        let location = info
            .location()
            .map(|location| location.to_string())
            .unwrap_or_default();

        error!(
            location = %location,
            backtrace = %Backtrace::capture(),
            "panicked: {message}"
        );
    }));
}
