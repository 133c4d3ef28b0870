use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("rental_assistant.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("rental_assistant.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("rental_assistant.client.request_duration_seconds");

pub(crate) static SESSION_EXCHANGES: Counter =
    Counter::new("rental_assistant.session.exchanges");
pub(crate) static SESSION_FAILED_EXCHANGES: Counter =
    Counter::new("rental_assistant.session.failed_exchanges");
pub(crate) static SESSION_RESETS: Counter = Counter::new("rental_assistant.session.resets");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_EXCHANGES);
    collector.register_counter(&SESSION_FAILED_EXCHANGES);
    collector.register_counter(&SESSION_RESETS);
}
