use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{GlueError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub label: String,
    pub values: Vec<f64>,
}

impl Component {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A named table: every component is one column of the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub label: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Data {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn component(&self, label: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.label == label)
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.components.first().map_or(0, |c| c.values.len())
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.size();
        let mut labels = HashSet::new();
        for component in &self.components {
            if component.values.len() != size {
                return Err(GlueError::invalid_session(format!(
                    "component {:?} of {:?} has {} values, expected {}",
                    component.label,
                    self.label,
                    component.values.len(),
                    size
                )));
            }
            if !labels.insert(component.label.as_str()) {
                return Err(GlueError::invalid_session(format!(
                    "duplicate component {:?} in {:?}",
                    component.label, self.label
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataCollection {
    data: Vec<Data>,
}

impl DataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the collection untouched, if the label is taken.
    pub fn append(&mut self, data: Data) -> bool {
        if self.get(&data.label).is_some() {
            return false;
        }
        self.data.push(data);
        true
    }

    pub fn get(&self, label: &str) -> Option<&Data> {
        self.data.iter().find(|d| d.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Data> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|d| d.label.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        let mut labels = HashSet::new();
        for data in &self.data {
            if !labels.insert(data.label.as_str()) {
                return Err(GlueError::invalid_session(format!(
                    "duplicate dataset {:?}",
                    data.label
                )));
            }
            data.validate()?;
        }
        Ok(())
    }
}
