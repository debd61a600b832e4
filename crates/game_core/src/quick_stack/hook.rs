//! Host integration
//!
//! The host's bulk-stack routine announces the signals it raises. Quick-stack hangs
//! a UI refresh off `StackingSucceeded`; a host without that signal leaves the
//! feature unsupported instead of failing.

use super::authority::Role;
use crate::error::QuickStackError;
use std::fmt;
use std::sync::Arc;

/// Signals raised by the host's bulk-stack routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignal {
    /// Raised once per run when at least one item was stacked
    StackingSucceeded,
}

impl fmt::Display for HostSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostSignal::StackingSucceeded => write!(f, "stacking succeeded"),
        }
    }
}

/// A display surface showing storage contents
pub trait StorageUi: Send + Sync {
    fn refresh_items(&self);
}

type Listener = Box<dyn FnMut() + Send>;

/// The host's "quick stack to all nearby chests" routine
pub struct BulkStackRoutine {
    name: String,
    signals: Vec<HostSignal>,
    listeners: Vec<(HostSignal, Listener)>,
}

impl fmt::Debug for BulkStackRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkStackRoutine")
            .field("name", &self.name)
            .field("signals", &self.signals)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl BulkStackRoutine {
    pub fn new(name: impl Into<String>, signals: Vec<HostSignal>) -> Self {
        Self {
            name: name.into(),
            signals,
            listeners: Vec::new(),
        }
    }

    /// The routine as shipped by the host
    pub fn standard() -> Self {
        Self::new("quick_stack_all_chests", vec![HostSignal::StackingSucceeded])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declares(&self, signal: HostSignal) -> bool {
        self.signals.contains(&signal)
    }

    /// Subscribes `listener` to `signal`. Fails if the routine never raises it.
    pub fn subscribe(
        &mut self,
        signal: HostSignal,
        listener: impl FnMut() + Send + 'static,
    ) -> Result<(), QuickStackError> {
        if !self.declares(signal) {
            return Err(QuickStackError::IntegrationNotFound {
                routine: self.name.clone(),
                signal: signal.to_string(),
            });
        }
        self.listeners.push((signal, Box::new(listener)));
        Ok(())
    }

    pub fn raise(&mut self, signal: HostSignal) {
        for (s, listener) in self.listeners.iter_mut() {
            if *s == signal {
                listener();
            }
        }
    }
}

/// Whether the host integration could be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    Supported,
    Unsupported,
}

/// Hooks quick-stack into `routine`. On hosts without the expected signal, logs
/// a warning and reports `Unsupported`; the host keeps its own behaviour.
pub fn install(
    routine: &mut BulkStackRoutine,
    role: Role,
    ui: Option<Arc<dyn StorageUi>>,
) -> Integration {
    let refresh = move || {
        if role.has_display() {
            if let Some(ui) = &ui {
                ui.refresh_items();
            }
        }
    };

    match routine.subscribe(HostSignal::StackingSucceeded, refresh) {
        Ok(()) => {
            tracing::info!("Quick-stack to storage hooked into `{}`", routine.name());
            Integration::Supported
        }
        Err(e) => {
            tracing::warn!("{}", e);
            Integration::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingUi(AtomicUsize);

    impl StorageUi for CountingUi {
        fn refresh_items(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_install_on_standard_routine() {
        let ui = Arc::new(CountingUi::default());
        let mut routine = BulkStackRoutine::standard();

        let state = install(&mut routine, Role::StandaloneAuthoritative, Some(ui.clone() as Arc<dyn StorageUi>));
        assert_eq!(state, Integration::Supported);

        routine.raise(HostSignal::StackingSucceeded);
        assert_eq!(ui.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_signal_degrades() {
        let ui = Arc::new(CountingUi::default());
        let mut routine = BulkStackRoutine::new("patched_elsewhere", Vec::new());

        let state = install(&mut routine, Role::StandaloneAuthoritative, Some(ui.clone() as Arc<dyn StorageUi>));
        assert_eq!(state, Integration::Unsupported);

        routine.raise(HostSignal::StackingSucceeded);
        assert_eq!(ui.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dedicated_server_does_not_refresh() {
        let ui = Arc::new(CountingUi::default());
        let mut routine = BulkStackRoutine::standard();

        install(&mut routine, Role::Authoritative, Some(ui.clone() as Arc<dyn StorageUi>));
        routine.raise(HostSignal::StackingSucceeded);
        assert_eq!(ui.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscribe_error() {
        let mut routine = BulkStackRoutine::new("bare", Vec::new());
        let err = routine
            .subscribe(HostSignal::StackingSucceeded, || {})
            .unwrap_err();
        assert!(matches!(err, QuickStackError::IntegrationNotFound { .. }));
    }
}
