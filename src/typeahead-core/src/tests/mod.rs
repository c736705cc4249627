//! Scenario tests driving the reducer event by event.
