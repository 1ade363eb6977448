//! Parameter definitions for noise modules.
//!
//! Parameters are the user-editable values on a node (frequency, octave
//! count, clamp bounds, ...). Values are stored on the node as plain `f64`s in
//! definition order; the definition says how to clamp and display them.

/// How a parameter value should be displayed and edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterDisplay {
    /// Continuous value with a fixed number of decimals.
    Linear { decimals: usize },
    /// Whole numbers only (octave counts, seeds).
    Integer,
    /// Discrete steps with named values.
    Choice { labels: &'static [&'static str] },
    /// On/off toggle switch.
    Toggle,
}

impl ParameterDisplay {
    /// Creates a linear display with the given precision.
    pub fn linear(decimals: usize) -> Self {
        Self::Linear { decimals }
    }

    /// Creates a discrete display with named steps.
    pub fn choice(labels: &'static [&'static str]) -> Self {
        Self::Choice { labels }
    }

    /// Returns true if values of this parameter are whole numbers.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::Linear { .. })
    }

    /// Formats a value for display next to its widget.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Linear { decimals } => format!("{:.prec$}", value, prec = decimals),
            Self::Integer => format!("{}", value.round() as i64),
            Self::Choice { labels } => labels
                .get(value.round().max(0.0) as usize)
                .map(|label| label.to_string())
                .unwrap_or_else(|| "?".to_string()),
            Self::Toggle => {
                if value >= 0.5 {
                    "On".to_string()
                } else {
                    "Off".to_string()
                }
            }
        }
    }
}

/// Definition of a parameter on a noise module.
#[derive(Clone, Debug)]
pub struct ParameterDefinition {
    /// Unique identifier for this parameter within the module.
    pub id: &'static str,
    /// Human-readable name displayed in the UI.
    pub name: &'static str,
    /// Minimum value of the parameter.
    pub min: f64,
    /// Maximum value of the parameter.
    pub max: f64,
    /// Value assigned when the node is created.
    pub default: f64,
    /// How to display and interpret the parameter value.
    pub display: ParameterDisplay,
}

impl ParameterDefinition {
    /// Creates a new parameter definition.
    pub fn new(
        id: &'static str,
        name: &'static str,
        min: f64,
        max: f64,
        default: f64,
        display: ParameterDisplay,
    ) -> Self {
        Self {
            id,
            name,
            min,
            max,
            default,
            display,
        }
    }

    /// Creates a continuous parameter shown with two decimals.
    pub fn linear(id: &'static str, name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self::new(id, name, min, max, default, ParameterDisplay::linear(2))
    }

    /// Creates an integer-valued parameter.
    pub fn integer(id: &'static str, name: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self::new(
            id,
            name,
            min as f64,
            max as f64,
            default as f64,
            ParameterDisplay::Integer,
        )
    }

    /// Creates a toggle (boolean) parameter.
    pub fn toggle(id: &'static str, name: &'static str, default: bool) -> Self {
        Self::new(
            id,
            name,
            0.0,
            1.0,
            if default { 1.0 } else { 0.0 },
            ParameterDisplay::Toggle,
        )
    }

    /// Creates a discrete choice parameter.
    pub fn choice(
        id: &'static str,
        name: &'static str,
        labels: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        Self::new(
            id,
            name,
            0.0,
            labels.len().saturating_sub(1) as f64,
            default_index as f64,
            ParameterDisplay::choice(labels),
        )
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Discrete parameters are also rounded to the nearest whole step.
    pub fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.display.is_discrete() {
            clamped.round()
        } else {
            clamped
        }
    }

    /// Normalizes a value from the parameter's range to 0.0-1.0.
    pub fn normalize(&self, value: f64) -> f64 {
        if (self.max - self.min).abs() < f64::EPSILON {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

/// Reads parameter `index` as a whole number.
pub(crate) fn as_int(params: &[f64], index: usize) -> i32 {
    params.get(index).copied().unwrap_or(0.0).round() as i32
}

/// Reads parameter `index` as a flag.
pub(crate) fn as_flag(params: &[f64], index: usize) -> bool {
    params.get(index).copied().unwrap_or(0.0) >= 0.5
}
