use std::cell::Cell;

/// Environment variable that turns on diagnostic traces.
pub(crate) const TRACE_ENV_VAR: &str = "MDARRAY_TRACE";

struct TraceSwitch(Cell<SwitchState>);
#[derive(Clone, Copy)]
enum SwitchState {
    Unknown,
    On,
    Off,
}
impl TraceSwitch {
    const fn new() -> Self {
        Self(Cell::new(SwitchState::Unknown))
    }

    fn is_on(&self, detect: impl FnOnce() -> bool) -> bool {
        match self.0.get() {
            SwitchState::On => true,
            SwitchState::Off => false,
            SwitchState::Unknown => {
                let on = detect();
                self.0.set(if on { SwitchState::On } else { SwitchState::Off });
                on
            }
        }
    }
}

thread_local! {
    static TRACE_SWITCH: TraceSwitch = const { TraceSwitch::new() };
}

#[inline(never)]
#[cold]
pub(crate) fn is_trace_enabled() -> bool {
    TRACE_SWITCH.with(|switch| switch.is_on(|| std::env::var_os(TRACE_ENV_VAR).is_some()))
}

/// Print a diagnostic line to stderr if `MDARRAY_TRACE` is set.
macro_rules! trace {
    ($($arg:tt)*) => {{
        if $crate::tracing::is_trace_enabled() {
            eprintln!("[mdarray] {}", format_args!($($arg)*))
        }
    }};
}
pub(crate) use trace;
