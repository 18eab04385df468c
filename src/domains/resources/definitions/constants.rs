//! Mathematical constants resource definition.

use std::f64::consts::{E, PI, SQRT_2, TAU};

use super::ResourceDefinition;

/// Common mathematical constants as plain text.
pub struct ConstantsResource;

impl ConstantsResource {
    /// The golden ratio, `(1 + sqrt(5)) / 2`.
    pub fn golden_ratio() -> f64 {
        (1.0 + 5f64.sqrt()) / 2.0
    }
}

impl ResourceDefinition for ConstantsResource {
    const URI: &'static str = "calculator://constants";
    const NAME: &'static str = "Mathematical Constants";
    const DESCRIPTION: &'static str = "Common mathematical constants (pi, e, tau, golden ratio, square root of 2)";
    const MIME_TYPE: &'static str = "text/plain";

    fn content() -> String {
        format!(
            "Mathematical Constants:\n\n\
             π (pi):     {}\n\
             e (euler):  {}\n\
             τ (tau):    {}\n\
             φ (phi):    {}  # Golden ratio\n\
             √2:         {}\n",
            PI,
            E,
            TAU,
            Self::golden_ratio(),
            SQRT_2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_metadata() {
        assert_eq!(ConstantsResource::URI, "calculator://constants");
        assert_eq!(ConstantsResource::MIME_TYPE, "text/plain");
    }

    #[test]
    fn test_constants_content() {
        let content = ConstantsResource::content();
        assert!(content.starts_with("Mathematical Constants:\n\n"));
        assert!(content.contains("π (pi):     3.141592653589793\n"));
        assert!(content.contains("e (euler):  2.718281828459045\n"));
        assert!(content.contains("τ (tau):    6.283185307179586\n"));
        assert!(content.contains("φ (phi):    1.618033988749895  # Golden ratio\n"));
        assert!(content.contains("√2:         1.4142135623730951\n"));
    }
}
