//! Mock targets for testing

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Plain data returned by [`RecordingTarget::summary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub label: String,
    pub values: Vec<i64>,
    pub total: i64,
}

/// Target that records the name of every method that actually ran
#[derive(Debug, Default)]
pub struct RecordingTarget {
    calls: RefCell<Vec<String>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn double(&self, value: i64) -> i64 {
        self.record("double");
        value * 2
    }

    pub fn concat(&self, left: &str, right: &str) -> String {
        self.record("concat");
        format!("{}{}", left, right)
    }

    pub fn summary(&self, label: &str, values: &[i64]) -> Summary {
        self.record("summary");
        Summary {
            label: label.to_string(),
            values: values.to_vec(),
            total: values.iter().sum(),
        }
    }

    pub fn parse(&self, input: &str) -> Result<i64, String> {
        self.record("parse");
        input.parse().map_err(|_| format!("not a number: {}", input))
    }

    /// Number of recorded runs of `method`
    pub fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|m| *m == method).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, method: &str) {
        self.calls.borrow_mut().push(method.to_string());
    }
}
