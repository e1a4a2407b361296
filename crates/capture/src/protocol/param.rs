use serde::Serialize;

/// One decoded `application/x-www-form-urlencoded` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    name: String,
    value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Param {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}
