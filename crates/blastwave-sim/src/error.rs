//! Errors raised at the boundary of the damage engine.

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("entity {0:?} is not a projectile and cannot instigate line damage")]
    UnknownInstigator(hecs::Entity),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Reject NaN and infinities.
pub fn ensure_finite(name: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite { name, value })
    }
}

/// Reject NaN, infinities and negative values.
pub fn ensure_non_negative(name: &'static str, value: f32) -> SimResult<f32> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        Err(SimError::Negative { name, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", -3.0).unwrap(), -3.0);
        assert!(matches!(
            ensure_finite("x", f32::NAN),
            Err(SimError::NonFinite { name: "x", .. })
        ));
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("radius", 0.0).unwrap(), 0.0);
        assert!(matches!(
            ensure_non_negative("radius", -1.0),
            Err(SimError::Negative { name: "radius", .. })
        ));
        assert!(matches!(
            ensure_non_negative("radius", f32::INFINITY),
            Err(SimError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = SimError::Negative {
            name: "radius",
            value: -2.0,
        };
        assert_eq!(err.to_string(), "radius must not be negative, got -2");
    }
}
