//! `TypedForm`: one editable form for any disease.

use serde_json::{Map, Value};
use tracing::debug;

use diagno_contracts::{
    disease::{DiseaseInput, DiseaseType},
    error::{DiagnoError, DiagnoResult},
};

use crate::{
    catalog,
    field::{FieldDescriptor, FieldKind},
};

/// Field values for one disease, initialised from the catalog defaults.
///
/// Number fields take whatever the user types; text that is not a finite
/// number is stored as 0. Choice fields only accept one of their options.
/// Bounds are checked by `validate`, and `submit` will not build an input
/// while any bound is violated.
#[derive(Debug, Clone)]
pub struct TypedForm {
    disease: DiseaseType,
    fields: &'static [FieldDescriptor],
    values: Vec<f64>,
}

impl TypedForm {
    pub fn new(disease: DiseaseType) -> Self {
        let fields = catalog::fields(disease);
        Self {
            disease,
            fields,
            values: fields.iter().map(|f| f.default).collect(),
        }
    }

    pub fn disease(&self) -> DiseaseType {
        self.disease
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Descriptors paired with their current values, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static FieldDescriptor, f64)> + '_ {
        self.fields.iter().zip(self.values.iter().copied())
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.index(name).ok().map(|i| self.values[i])
    }

    /// Set `name` from raw text.
    pub fn set(&mut self, name: &str, raw: &str) -> DiagnoResult<()> {
        let i = self.index(name)?;
        let field = &self.fields[i];

        let value = match field.kind {
            FieldKind::Number { .. } => parse_number(raw),
            FieldKind::Choice(options) => {
                let option = field.option(raw).ok_or_else(|| DiagnoError::InvalidField {
                    field: name.to_string(),
                    reason: format!(
                        "'{}' is not one of: {}",
                        raw.trim(),
                        options
                            .iter()
                            .map(|o| format!("{} ({})", o.value, o.label))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })?;
                f64::from(option.value)
            }
        };

        debug!(disease = %self.disease, field = name, value, "field set");
        self.values[i] = value;
        Ok(())
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        for (value, field) in self.values.iter_mut().zip(self.fields) {
            *value = field.default;
        }
    }

    /// Every bound violation, in field order. Empty means submittable.
    pub fn validate(&self) -> Vec<String> {
        self.entries()
            .filter_map(|(field, value)| field.violation(value))
            .collect()
    }

    /// The request body as a flat JSON object keyed by field name. Choice
    /// values are written as integers.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (field, value) in self.entries() {
            let json = if field.is_choice() {
                Value::from(value as u8)
            } else {
                Value::from(value)
            };
            body.insert(field.name.to_string(), json);
        }
        Value::Object(body)
    }

    /// Build the typed input, or `FormConstraint` listing what is out of
    /// bounds.
    pub fn submit(&self) -> DiagnoResult<DiseaseInput> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(DiagnoError::FormConstraint { violations });
        }
        DiseaseInput::from_json(self.disease, self.to_json())
    }

    fn index(&self, name: &str) -> DiagnoResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DiagnoError::InvalidField {
                field: name.to_string(),
                reason: format!("not a {} field", self.disease),
            })
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
