/// Monotonic reshaping of a time fraction in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFn {
    /// Identity.
    #[default]
    Linear,
    /// Normalised logistic ease-in-out; larger `inflection` is steeper in the middle.
    Smooth {
        #[serde(default = "default_inflection", deserialize_with = "positive_inflection")]
        inflection: f64,
    },
    /// Rises to 1 at the midpoint and returns to 0.
    ThereAndBack,
    /// Caller supplied function.
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

/// Below this the normalising denominator loses all precision.
const MIN_INFLECTION: f64 = 1e-6;

fn default_inflection() -> f64 {
    6.0
}

fn positive_inflection<'de, D: serde::Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let v = <f64 as serde::Deserialize>::deserialize(de)?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(serde::de::Error::custom(format!(
            "smooth inflection must be positive and finite, got {v}"
        )))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl TransferFn {
    /// Smooth with the default inflection of 6.
    pub fn smooth() -> Self {
        Self::Smooth {
            inflection: default_inflection(),
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth { inflection } => {
                // A flat logistic degenerates to the identity.
                if !(inflection.is_finite() && inflection > MIN_INFLECTION) {
                    return t;
                }
                let err = sigmoid(-inflection / 2.0);
                ((sigmoid(inflection * (t - 0.5)) - err) / (1.0 - 2.0 * err)).clamp(0.0, 1.0)
            }
            Self::ThereAndBack => {
                0.5 * (1.0 + (t * 2.0 * std::f64::consts::PI - std::f64::consts::FRAC_PI_2).sin())
            }
            Self::Custom(f) => f(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transfer.rs"]
mod tests;
