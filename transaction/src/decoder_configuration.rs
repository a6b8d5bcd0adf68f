use std::cell::RefCell;

thread_local! {
    static ACTIVE: RefCell<Option<DecoderConfiguration>> = RefCell::new(None);
}

/// Options for the header decoder.
///
/// The default configuration is the strict one: boolean header values are
/// rejected and there is no limit on the number of values per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfiguration {
    accept_boolean_values: bool,
    max_values_per_header: Option<usize>,
}

impl DecoderConfiguration {
    pub fn new() -> Self {
        Self {
            accept_boolean_values: false,
            max_values_per_header: None,
        }
    }

    /// Render boolean header values as `"true"`/`"false"` instead of failing.
    pub fn set_accept_boolean_values(&mut self, value: bool) {
        self.accept_boolean_values = value;
    }

    pub fn accept_boolean_values(&self) -> bool {
        self.accept_boolean_values
    }

    pub fn set_max_values_per_header(&mut self, limit: usize) {
        self.max_values_per_header = Some(limit);
    }

    pub fn clear_max_values_per_header(&mut self) {
        self.max_values_per_header = None;
    }

    pub fn max_values_per_header(&self) -> Option<usize> {
        self.max_values_per_header
    }

}

/// Runs `f` with `config` visible to every `Headers` deserialized on this
/// thread. The previous configuration is restored when `f` returns or unwinds.
pub(crate) fn with_configuration<T>(config: &DecoderConfiguration, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<DecoderConfiguration>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            ACTIVE.with(|active| *active.borrow_mut() = previous);
        }
    }

    let previous = ACTIVE.with(|active| active.borrow_mut().replace(config.clone()));
    let _restore = Restore(previous);
    f()
}

/// The configuration installed by `with_configuration`, or the strict default.
pub(crate) fn active_configuration() -> DecoderConfiguration {
    ACTIVE.with(|active| active.borrow().clone().unwrap_or_default())
}
