//! Field descriptors.

/// One entry of a select-style field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub value: u8,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free numeric entry. `step` is the input granularity shown to users;
    /// only `min..=max` is enforced.
    Number { min: f64, max: f64, step: f64 },
    /// A coded categorical; only the listed values are accepted.
    Choice(&'static [ChoiceOption]),
}

/// Describes one input of a disease form.
///
/// `name` is the exact key the prediction backend expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: f64,
}

impl FieldDescriptor {
    pub const fn number(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self { name, label, kind: FieldKind::Number { min, max, step }, default }
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [ChoiceOption],
        default: f64,
    ) -> Self {
        Self { name, label, kind: FieldKind::Choice(options), default }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }

    /// The option whose value or label (case-insensitive) equals `raw`.
    pub fn option(&self, raw: &str) -> Option<&'static ChoiceOption> {
        let FieldKind::Choice(options) = self.kind else {
            return None;
        };
        let raw = raw.trim();
        options.iter().find(|o| {
            raw.parse::<u8>().map_or(false, |v| v == o.value) || o.label.eq_ignore_ascii_case(raw)
        })
    }

    /// Describe why `value` is not acceptable, if it is not.
    pub fn violation(&self, value: f64) -> Option<String> {
        match self.kind {
            FieldKind::Number { min, max, .. } if value < min || value > max => Some(format!(
                "{} must be between {} and {} (got {})",
                self.label, min, max, value
            )),
            FieldKind::Choice(options) if !options.iter().any(|o| f64::from(o.value) == value) => {
                Some(format!("{} has no option {}", self.label, value))
            }
            _ => None,
        }
    }
}
