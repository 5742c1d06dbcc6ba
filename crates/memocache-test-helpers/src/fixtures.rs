//! Test fixtures - targets to wrap in a proxy

use memocache_core::{CacheProxy, Result};
use std::cell::Cell;

/// Method whose result is never cached in the fixtures
pub const REALTIME_NAME: &str = "realtime_name";

/// Simple target with public state and a few methods reading it
#[derive(Debug)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    name_calls: Cell<usize>,
}

impl Default for Person {
    fn default() -> Self {
        Self::new("Test", "Case")
    }
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            name_calls: Cell::new(0),
        }
    }

    pub fn say_hello() -> String {
        "Hi!".to_string()
    }

    pub fn get_name(&self) -> String {
        self.name_calls.set(self.name_calls.get() + 1);
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn realtime_name(&self) -> String {
        self.get_name()
    }

    pub fn greet(&self, other: &str, excited: bool) -> String {
        let mark = if excited { "!" } else { "." };
        format!("Hello {}, I am {}{}", other, self.first_name, mark)
    }

    pub fn set_first_name(&mut self, first_name: &str) {
        self.first_name = first_name.to_string();
    }

    pub fn set_last_name(&mut self, last_name: &str) {
        self.last_name = last_name.to_string();
    }

    /// How many times the name was actually built
    pub fn name_calls(&self) -> usize {
        self.name_calls.get()
    }
}

/// Cacheable operations of [`Person`]
pub trait PersonApi {
    fn get_name(&self) -> Result<String>;
    fn realtime_name(&self) -> Result<String>;
    fn greet(&self, other: &str, excited: bool) -> Result<String>;
    fn say_hello(&self) -> Result<String>;
}

impl PersonApi for Person {
    fn get_name(&self) -> Result<String> {
        Ok(Person::get_name(self))
    }

    fn realtime_name(&self) -> Result<String> {
        Ok(Person::realtime_name(self))
    }

    fn greet(&self, other: &str, excited: bool) -> Result<String> {
        Ok(Person::greet(self, other, excited))
    }

    fn say_hello(&self) -> Result<String> {
        Ok(Person::say_hello())
    }
}

impl PersonApi for CacheProxy<'_, Person> {
    fn get_name(&self) -> Result<String> {
        self.call("get_name", &(), Person::get_name)
    }

    fn realtime_name(&self) -> Result<String> {
        self.call(REALTIME_NAME, &(), Person::realtime_name)
    }

    fn greet(&self, other: &str, excited: bool) -> Result<String> {
        self.call("greet", &(other, excited), |person| {
            person.greet(other, excited)
        })
    }

    fn say_hello(&self) -> Result<String> {
        self.call_static("say_hello", &(), Person::say_hello)
    }
}

/// Proxy over a default [`Person`] with [`REALTIME_NAME`] ignored
pub fn person_proxy(cache: &memocache_core::CacheRepository) -> CacheProxy<'_, Person> {
    CacheProxy::new(cache, Person::default(), [REALTIME_NAME])
}
