//! Curvature variant selector

use std::fmt;
use std::str::FromStr;

use demcurv_core::Error;
use serde::{Deserialize, Serialize};

/// Which curvature metric to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurvatureVariant {
    /// Curvature perpendicular to the slope direction (flow convergence)
    #[default]
    Planform,
    /// Curvature along the slope direction (flow acceleration)
    Profile,
    /// Rounded planform plus rounded profile
    Total,
    /// McNab symmetric-difference concavity index over an s×s window
    McNab,
    /// Bolstad deviation-from-focal-mean index over an s×s window
    Bolstad,
}

impl CurvatureVariant {
    /// All variants in their canonical order
    pub const ALL: [CurvatureVariant; 5] = [
        CurvatureVariant::Planform,
        CurvatureVariant::Profile,
        CurvatureVariant::Total,
        CurvatureVariant::McNab,
        CurvatureVariant::Bolstad,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            CurvatureVariant::Planform => "planform",
            CurvatureVariant::Profile => "profile",
            CurvatureVariant::Total => "total",
            CurvatureVariant::McNab => "mcnab",
            CurvatureVariant::Bolstad => "bolstad",
        }
    }

    /// Whether the caller's window size is honoured (McNab, Bolstad)
    pub fn uses_focal_window(&self) -> bool {
        matches!(self, CurvatureVariant::McNab | CurvatureVariant::Bolstad)
    }

    /// Effective window side: the requested size for focal variants, otherwise 3
    pub fn window_size(&self, requested: usize) -> usize {
        if self.uses_focal_window() { requested } else { 3 }
    }
}

impl fmt::Display for CurvatureVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurvatureVariant {
    type Err = Error;

    /// Exact, case-sensitive match on the canonical name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurvatureVariant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = CurvatureVariant::ALL.iter().map(|v| v.name()).collect();
                Error::invalid_argument(
                    "variant",
                    s,
                    format!("expected one of: {}", names.join(", ")),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for v in CurvatureVariant::ALL {
            assert_eq!(v.name().parse::<CurvatureVariant>().unwrap(), v);
            assert_eq!(v.to_string(), v.name());
        }
    }

    #[test]
    fn test_unknown_variant_lists_valid_names() {
        let err = "slope".parse::<CurvatureVariant>().unwrap_err();
        match err {
            Error::InvalidArgument { name, value, reason } => {
                assert_eq!(name, "variant");
                assert_eq!(value, "slope");
                assert_eq!(reason, "expected one of: planform, profile, total, mcnab, bolstad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("Planform".parse::<CurvatureVariant>().is_err());
        assert!("McNab".parse::<CurvatureVariant>().is_err());
        assert!(" total".parse::<CurvatureVariant>().is_err());
    }

    #[test]
    fn test_window_size_fixed_for_zevenbergen() {
        assert_eq!(CurvatureVariant::Profile.window_size(7), 3);
        assert_eq!(CurvatureVariant::Total.window_size(1), 3);
        assert_eq!(CurvatureVariant::McNab.window_size(7), 7);
        assert_eq!(CurvatureVariant::Bolstad.window_size(5), 5);
    }
}
